mod generator_tests;
mod mocks;
