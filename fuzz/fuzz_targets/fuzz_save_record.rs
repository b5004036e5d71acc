//! Fuzz target: save-record decoder
//!
//! Feeds arbitrary text to `SaveRecord::parse` and checks:
//! - No panics under arbitrary input
//! - Every accepted record has in-range stats and age stage
//! - Every accepted record re-encodes and decodes to itself
//!
//! cargo fuzz run fuzz_save_record

#![no_main]

use libfuzzer_sys::fuzz_target;
use tamagotchi::pet::stats::STAT_MAX;
use tamagotchi::record::SaveRecord;

const MAX_AGE_STAGE: u8 = 4;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = core::str::from_utf8(data) else {
        return;
    };
    let Ok(record) = SaveRecord::parse(text, MAX_AGE_STAGE) else {
        return;
    };

    assert!(record.health <= STAT_MAX);
    assert!(record.hunger <= STAT_MAX);
    assert!(record.happiness <= STAT_MAX);
    assert!((1..=MAX_AGE_STAGE).contains(&record.age_stage));

    let encoded = record.to_text().expect("accepted record must encode");
    let decoded = SaveRecord::parse(&encoded, MAX_AGE_STAGE).expect("encoded record must decode");
    assert_eq!(decoded, record, "re-encoding changed the record");
});
