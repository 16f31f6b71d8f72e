mod concurrency_tests;
mod determinism_tests;
