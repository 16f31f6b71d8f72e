use proptest::prelude::*;

use publog::catalog::{CatalogIndex, CatalogItem, tokenize};
use publog::loader::clean_field;

proptest! {
    #[test]
    fn test_tokenize_deterministic(text in ".*") {
        prop_assert_eq!(tokenize(&text), tokenize(&text));
    }

    #[test]
    fn test_tokens_are_long_lowercase_and_unique(text in ".*") {
        let tokens = tokenize(&text);
        for token in &tokens {
            prop_assert!(token.len() > 2);
            prop_assert_eq!(token, &token.to_lowercase());
            prop_assert!(!token.contains(char::is_whitespace));
        }
        let mut sorted = tokens.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(sorted.len(), tokens.len());
    }

    #[test]
    fn test_tokenize_ignores_case(text in "[a-zA-Z ,.-]{0,64}") {
        prop_assert_eq!(tokenize(&text.to_uppercase()), tokenize(&text.to_lowercase()));
    }

    #[test]
    fn test_clean_field_idempotent(text in ".*") {
        let once = clean_field(&text);
        prop_assert_eq!(clean_field(&once), once.clone());
    }

    #[test]
    fn test_name_search_finds_every_indexed_word(words in prop::collection::vec("[a-z]{3,10}", 1..5)) {
        let name = words.join(" ").to_uppercase();
        let index = CatalogIndex::new();
        index.load_items([CatalogItem::new("5820-01-546-5288", name)]);

        let results = index.search_by_name(&words.join(" ")).unwrap();
        prop_assert_eq!(results.len(), 1);
        for word in &words {
            prop_assert_eq!(index.search_by_name(word).unwrap().len(), 1);
        }
    }

    #[test]
    fn test_search_never_panics(query in ".*") {
        let index = CatalogIndex::new();
        index.load_items([CatalogItem::new("5820-01-546-5288", "CAMERA, TELEVISION")]);
        let _ = index.search_by_name(&query);
        let _ = index.search_by_part_number(&query);
        let _ = index.search_manufacturer_by_name(&query);
    }
}
