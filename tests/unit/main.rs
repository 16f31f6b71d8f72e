mod catalog_index_tests;
mod cli_command_parse_tests;
mod config_tests;
mod loader_tests;
