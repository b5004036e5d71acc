//! Save-file round trips through the real filesystem store.

use std::fs;

use super::mock_ports::RecordingSink;

use tamagotchi::adapters::file_store::FileSaveStore;
use tamagotchi::app::events::PetNotification;
use tamagotchi::app::ports::{SaveStore, StoreError};
use tamagotchi::app::service::PetService;
use tamagotchi::config::PetConfig;
use tamagotchi::error::{Error, RecordError};
use tamagotchi::events::Pulse;
use tamagotchi::fsm::Phase;
use tamagotchi::pet::{PetName, Stat};

fn config_in(dir: &std::path::Path) -> PetConfig {
    PetConfig {
        save_dir: dir.join("saves").to_string_lossy().into_owned(),
        ..PetConfig::default()
    }
}

#[test]
fn save_writes_six_line_record() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    let mut store = FileSaveStore::from_config(&config);
    let mut sink = RecordingSink::new();

    let mut svc = PetService::new_pet(config, "Rex", "Dark Theme").unwrap();
    svc.start(&mut sink, &mut store);
    for _ in 0..20 {
        svc.handle_pulse(Pulse::Clock, &mut sink, &mut store);
    }
    let record = svc.save(&mut sink, &mut store).unwrap().unwrap();

    let text = fs::read_to_string(tmp.path().join("saves").join("Rex.TAMA")).unwrap();
    assert_eq!(text, "Rex\n96\n90\n94\nDark Theme\n1");
    assert_eq!(record.hunger, 90);
    assert_eq!(sink.last_status(), Some("File has been saved!"));
}

#[test]
fn load_restores_saved_pet() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    fs::create_dir_all(&config.save_dir).unwrap();
    fs::write(
        tmp.path().join("saves").join("Rex.TAMA"),
        "Rex\n80\n55\n90\nPink Theme\n3\n",
    )
    .unwrap();

    let mut store = FileSaveStore::from_config(&config);
    let mut sink = RecordingSink::new();
    let name = PetName::new("Rex").unwrap();
    let svc = PetService::load(config, &name, &mut store, &mut sink).unwrap();

    let pet = svc.pet();
    assert_eq!(pet.stat(Stat::Health), 80);
    assert_eq!(pet.stat(Stat::Hunger), 55);
    assert_eq!(pet.stat(Stat::Happiness), 90);
    assert_eq!(pet.style, "Pink Theme");
    assert_eq!(pet.age_stage, 3);
    assert!(sink.events.contains(&PetNotification::StageChanged(3)));
    assert_eq!(svc.phase(), Phase::Awake);
}

#[test]
fn corrupt_record_aborts_load() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    fs::create_dir_all(&config.save_dir).unwrap();
    fs::write(tmp.path().join("saves").join("Rex.TAMA"), "Rex\n80\nlots\n90\nPink Theme\n3").unwrap();

    let mut store = FileSaveStore::from_config(&config);
    let mut sink = RecordingSink::new();
    let name = PetName::new("Rex").unwrap();
    let err = PetService::load(config, &name, &mut store, &mut sink).err().unwrap();

    assert_eq!(err, Error::Record(RecordError::InvalidNumber("hunger")));
    assert!(sink.events.is_empty(), "no partial state may be published");
    assert!(store.exists(&name), "a corrupt save is left alone");
}

#[test]
fn record_under_another_name_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    fs::create_dir_all(&config.save_dir).unwrap();
    let path = tmp.path().join("saves").join("Rex.TAMA");
    fs::write(&path, "Bob\n80\n55\n90\nPink Theme\n3").unwrap();

    let mut store = FileSaveStore::from_config(&config);
    let mut sink = RecordingSink::new();
    let name = PetName::new("Rex").unwrap();
    let err = PetService::load(config, &name, &mut store, &mut sink).err().unwrap();

    assert_eq!(err, Error::Record(RecordError::NameMismatch));
    assert!(sink.events.is_empty());
    assert!(path.exists());
}

#[test]
fn missing_record_is_not_found() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_in(tmp.path());
    let mut store = FileSaveStore::from_config(&config);
    let mut sink = RecordingSink::new();
    let name = PetName::new("Ghost").unwrap();
    let err = PetService::load(config, &name, &mut store, &mut sink).err().unwrap();
    assert_eq!(err, Error::Store(StoreError::NotFound));
}

#[test]
fn death_removes_the_save_file() {
    let tmp = tempfile::tempdir().unwrap();
    let config = PetConfig {
        age_up_every: 1,
        ..config_in(tmp.path())
    };
    fs::create_dir_all(&config.save_dir).unwrap();
    let path = tmp.path().join("saves").join("Rex.TAMA");
    fs::write(&path, "Rex\n80\n55\n90\nPink Theme\n4").unwrap();

    let mut store = FileSaveStore::from_config(&config);
    let mut sink = RecordingSink::new();
    let name = PetName::new("Rex").unwrap();
    let mut svc = PetService::load(config, &name, &mut store, &mut sink).unwrap();
    svc.handle_pulse(Pulse::Clock, &mut sink, &mut store);

    assert_eq!(svc.phase(), Phase::Dead);
    assert!(!path.exists());
    assert!(store.list().unwrap().is_empty());
}

#[test]
fn unsaved_pet_dies_without_error() {
    let tmp = tempfile::tempdir().unwrap();
    let config = PetConfig {
        age_up_every: 1,
        max_age_stage: 1,
        ..config_in(tmp.path())
    };
    let mut store = FileSaveStore::from_config(&config);
    let mut sink = RecordingSink::new();
    let mut svc = PetService::new_pet(config, "Rex", "Dark Theme").unwrap();
    svc.start(&mut sink, &mut store);
    svc.handle_pulse(Pulse::Clock, &mut sink, &mut store);

    assert!(svc.pet().flags.is_dead);
    assert_eq!(sink.count(&PetNotification::Died), 1);
}
