//! Unit tests for code generation

use std::collections::HashSet;

use crate::services::otp::{CodeGenerator, OsRandom, OtpConfig, RandomSource};

use super::mocks::{RecordingRandom, SequenceRandom};

fn generator(config: &OtpConfig) -> CodeGenerator {
    CodeGenerator::from_config(config)
}

#[test]
fn test_os_random_stays_in_range() {
    let random = OsRandom;
    for upper in [1, 2, 35, 36, 1000] {
        for _ in 0..200 {
            assert!(random.uniform_index(upper) < upper);
        }
    }
}

#[test]
fn test_os_random_covers_alphabet() {
    let random = OsRandom;
    let seen: HashSet<usize> = (0..5_000).map(|_| random.uniform_index(35)).collect();
    assert_eq!(seen.len(), 35);
}

#[test]
fn test_each_character_drawn_independently() {
    let random = RecordingRandom::new();
    let config = OtpConfig::default();
    let code = generator(&config).generate(&random);

    assert_eq!(code, "9999999999");
    let bounds = random.bounds.lock().unwrap();
    assert_eq!(bounds.len(), 10);
    assert!(bounds.iter().all(|&b| b == 35));
}

#[test]
fn test_maps_indices_onto_alphabet() {
    let random = SequenceRandom::new(vec![0, 1, 2, 25, 26, 34]);
    let config = OtpConfig::default().with_length(6);

    assert_eq!(generator(&config).generate(&random), "ABCZ19");
}

#[test]
fn test_multibyte_alphabet() {
    let random = SequenceRandom::new(vec![1, 0]);
    let config = OtpConfig::default().with_alphabet("αβ").with_length(4);
    let generator = generator(&config);

    assert_eq!(generator.alphabet(), &['α', 'β']);
    assert_eq!(generator.length(), 4);
    assert_eq!(generator.generate(&random), "βαβα");
}
