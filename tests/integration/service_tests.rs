//! Integration tests for the PetService → phase machine → sink pipeline.
//!
//! Pulses are injected by hand, so every scenario is deterministic and
//! independent of wall-clock time.

use super::mock_ports::{BrokenStore, RecordingSink, ScriptedMinigame};

use tamagotchi::adapters::memory_store::MemorySaveStore;
use tamagotchi::app::commands::{ActionOutcome, MinigameOutcome, Rejection, UserAction};
use tamagotchi::app::events::PetNotification;
use tamagotchi::app::ports::SaveStore;
use tamagotchi::app::service::PetService;
use tamagotchi::config::PetConfig;
use tamagotchi::events::Pulse;
use tamagotchi::fsm::Phase;
use tamagotchi::pet::{LifeFlag, Stat};
use tamagotchi::record::SaveRecord;

fn new_pet(config: PetConfig) -> (PetService, RecordingSink, MemorySaveStore) {
    let mut sink = RecordingSink::new();
    let mut store = MemorySaveStore::new();
    let mut svc = PetService::new_pet(config, "Kiwi", "Light Theme").unwrap();
    svc.start(&mut sink, &mut store);
    (svc, sink, store)
}

/// Start a session from record text, with the record also saved in the store.
fn restored(config: PetConfig, text: &str) -> (PetService, RecordingSink, MemorySaveStore) {
    let record = SaveRecord::parse(text, config.max_age_stage).unwrap();
    let mut sink = RecordingSink::new();
    let mut store = MemorySaveStore::with_max_age_stage(config.max_age_stage);
    store.save(&record).unwrap();
    let mut svc = PetService::from_record(config, &record).unwrap();
    svc.start(&mut sink, &mut store);
    (svc, sink, store)
}

fn ticks(svc: &mut PetService, n: usize, sink: &mut RecordingSink, store: &mut MemorySaveStore) {
    for _ in 0..n {
        svc.handle_pulse(Pulse::Clock, sink, store);
    }
}

/// A pet one hunger decay away from sickness, made sick on tick 2.
fn sick_pet() -> (PetService, RecordingSink, MemorySaveStore) {
    let (mut svc, mut sink, mut store) =
        restored(PetConfig::default(), "Kiwi\n100\n1\n60\nLight Theme\n1");
    ticks(&mut svc, 2, &mut sink, &mut store);
    assert_eq!(svc.phase(), Phase::Sick);
    (svc, sink, store)
}

// ── Decay ─────────────────────────────────────────────────────

#[test]
fn ten_hunger_decays_from_new_pet() {
    let (mut svc, mut sink, mut store) = new_pet(PetConfig::default());
    ticks(&mut svc, 20, &mut sink, &mut store);

    assert_eq!(svc.pet().stat(Stat::Hunger), 90);
    assert_eq!(sink.stat_updates(Stat::Hunger).last(), Some(&90));
    assert!(!svc.pet().flags.is_sick);
    assert_eq!(svc.phase(), Phase::Awake);
}

#[test]
fn decay_follows_period_table() {
    let (mut svc, mut sink, mut store) = new_pet(PetConfig::default());
    ticks(&mut svc, 30, &mut sink, &mut store);
    assert_eq!(svc.pet().stat(Stat::Hunger), 85);
    assert_eq!(svc.pet().stat(Stat::Happiness), 90);
    assert_eq!(svc.pet().stat(Stat::Health), 94);
}

// ── Sickness ──────────────────────────────────────────────────

#[test]
fn hunger_at_zero_makes_pet_sick() {
    let (svc, sink, _) = sick_pet();
    assert!(svc.pet().flags.is_sick);
    assert!(svc.sickness_generation().is_some());

    let controls = sink.last_controls().unwrap();
    assert!(controls.medicate);
    assert!(!controls.feed && !controls.play && !controls.sleep);
    assert_eq!(sink.last_status(), Some("Kiwi needs medicine."));
}

#[test]
fn sickness_pulses_drain_health() {
    let (mut svc, mut sink, mut store) = sick_pet();
    let generation = svc.sickness_generation().unwrap();
    svc.handle_pulse(Pulse::Sickness(generation), &mut sink, &mut store);
    svc.handle_pulse(Pulse::Sickness(generation), &mut sink, &mut store);
    assert_eq!(svc.pet().stat(Stat::Health), 90);
    assert_eq!(svc.pet().stat(Stat::Happiness), 54);
}

#[test]
fn sickness_can_kill() {
    let (mut svc, mut sink, mut store) = sick_pet();
    let generation = svc.sickness_generation().unwrap();
    for _ in 0..20 {
        svc.handle_pulse(Pulse::Sickness(generation), &mut sink, &mut store);
    }
    assert_eq!(svc.phase(), Phase::Dead);
    assert_eq!(svc.pet().stat(Stat::Health), 0);
    assert_eq!(sink.count(&PetNotification::Died), 1);
    assert_eq!(svc.sickness_generation(), None);
    assert!(!svc.clock_running());
}

#[test]
fn medicate_cures_and_restores() {
    let (mut svc, mut sink, mut store) = sick_pet();
    let hunger = svc.pet().stat(Stat::Hunger);
    let happiness = svc.pet().stat(Stat::Happiness);

    assert_eq!(svc.medicate(&mut sink, &mut store), ActionOutcome::Applied);

    let pet = svc.pet();
    assert!(!pet.flags.is_sick);
    assert!(!pet.medicine_administered);
    assert_eq!(pet.stat(Stat::Hunger), hunger + 20);
    assert_eq!(pet.stat(Stat::Happiness), (happiness + 20).min(100));
    assert_eq!(svc.phase(), Phase::Awake);
    assert_eq!(svc.sickness_generation(), None);
    assert_eq!(sink.count(&PetNotification::SicknessResolved), 1);

    let controls = sink.last_controls().unwrap();
    assert!(controls.feed && controls.play && controls.sleep);
    assert!(!controls.medicate);
}

#[test]
fn medicate_when_healthy_is_a_no_op() {
    let (mut svc, mut sink, mut store) = new_pet(PetConfig::default());
    let before = svc.pet().clone();
    assert_eq!(
        svc.medicate(&mut sink, &mut store),
        ActionOutcome::Ignored(Rejection::NotSick)
    );
    assert_eq!(svc.pet(), &before);
}

#[test]
fn sick_pet_cannot_feed_play_or_sleep() {
    let (mut svc, mut sink, mut store) = sick_pet();
    for action in [UserAction::Feed, UserAction::Play, UserAction::ToggleSleep] {
        assert_eq!(
            svc.handle_action(action, &mut sink, &mut store),
            ActionOutcome::Ignored(Rejection::Sick)
        );
    }
}

// ── Sleep ─────────────────────────────────────────────────────

#[test]
fn full_nap_restores_and_wakes() {
    let config = PetConfig::default();
    let (mut svc, mut sink, mut store) = restored(config, "Kiwi\n50\n100\n90\nLight Theme\n1");

    assert!(svc.toggle_sleep(&mut sink, &mut store).is_applied());
    assert_eq!(svc.phase(), Phase::Sleeping);
    let controls = sink.last_controls().unwrap();
    assert!(!controls.feed && !controls.play && !controls.medicate);

    let generation = svc.sleep_generation().unwrap();
    for _ in 0..50 {
        svc.handle_pulse(Pulse::Sleep(generation), &mut sink, &mut store);
    }

    assert_eq!(svc.pet().stat(Stat::Health), 100);
    assert_eq!(svc.pet().stat(Stat::Happiness), 95);
    assert_eq!(svc.phase(), Phase::Awake);
    assert!(!svc.pet().flags.is_sleeping);
    assert_eq!(sink.count(&PetNotification::WokeUp), 1);
    assert!(sink.last_controls().unwrap().feed);

    // Extra pulses from the finished nap change nothing.
    svc.handle_pulse(Pulse::Sleep(generation), &mut sink, &mut store);
    assert_eq!(sink.count(&PetNotification::WokeUp), 1);
}

#[test]
fn early_wake_fires_once() {
    let (mut svc, mut sink, mut store) = new_pet(PetConfig::default());
    let _ = svc.toggle_sleep(&mut sink, &mut store);
    let generation = svc.sleep_generation().unwrap();
    for _ in 0..10 {
        svc.handle_pulse(Pulse::Sleep(generation), &mut sink, &mut store);
    }
    assert!(svc.toggle_sleep(&mut sink, &mut store).is_applied());
    for _ in 0..50 {
        svc.handle_pulse(Pulse::Sleep(generation), &mut sink, &mut store);
    }
    assert_eq!(sink.count(&PetNotification::WokeUp), 1);
    assert_eq!(svc.phase(), Phase::Awake);
}

#[test]
fn sleeping_pet_cannot_eat_or_play() {
    let (mut svc, mut sink, mut store) = new_pet(PetConfig::default());
    let _ = svc.toggle_sleep(&mut sink, &mut store);
    assert_eq!(
        svc.feed(&mut sink, &mut store),
        ActionOutcome::Ignored(Rejection::Sleeping)
    );
    assert_eq!(
        svc.start_minigame(&mut sink, &mut store),
        ActionOutcome::Ignored(Rejection::Sleeping)
    );
}

#[test]
fn pending_need_locks_the_wake_toggle() {
    let config = PetConfig {
        discipline_every: 3,
        ..PetConfig::default()
    };
    let (mut svc, mut sink, mut store) = new_pet(config);
    let _ = svc.toggle_sleep(&mut sink, &mut store);
    ticks(&mut svc, 3, &mut sink, &mut store);
    assert!(svc.pet().flags.needs_discipline);
    assert!(!svc.controls().sleep);

    assert_eq!(
        svc.toggle_sleep(&mut sink, &mut store),
        ActionOutcome::Ignored(Rejection::ControlDisabled)
    );
    assert!(svc.pet().flags.is_sleeping);
    assert_eq!(sink.count(&PetNotification::WokeUp), 0);

    // The nap still ends on its own.
    let generation = svc.sleep_generation().unwrap();
    for _ in 0..svc.config().sleep_periods {
        svc.handle_pulse(Pulse::Sleep(generation), &mut sink, &mut store);
    }
    assert!(!svc.pet().flags.is_sleeping);
    assert_eq!(sink.count(&PetNotification::WokeUp), 1);
    assert!(!svc.controls().sleep, "discipline still pending");
}

#[test]
fn sickness_waits_until_the_pet_wakes() {
    let (mut svc, mut sink, mut store) =
        restored(PetConfig::default(), "Kiwi\n100\n1\n100\nLight Theme\n1");
    let _ = svc.toggle_sleep(&mut sink, &mut store);

    ticks(&mut svc, 2, &mut sink, &mut store);
    assert_eq!(svc.pet().stat(Stat::Hunger), 0);
    assert!(!svc.pet().flags.is_sick);
    assert!(sink.flag_changes(LifeFlag::Sick).is_empty());

    let _ = svc.toggle_sleep(&mut sink, &mut store);
    ticks(&mut svc, 2, &mut sink, &mut store);
    assert!(svc.pet().flags.is_sick);
    assert_eq!(svc.phase(), Phase::Sick);
}

// ── Needs ─────────────────────────────────────────────────────

#[test]
fn both_needs_block_until_both_cleared() {
    let config = PetConfig {
        discipline_every: 3,
        cleaning_every: 3,
        ..PetConfig::default()
    };
    let (mut svc, mut sink, mut store) = new_pet(config);
    ticks(&mut svc, 3, &mut sink, &mut store);

    assert!(svc.pet().flags.needs_discipline && svc.pet().flags.needs_cleaning);
    assert_eq!(sink.last_status(), Some("Kiwi needs Disciplining"));
    assert_eq!(
        svc.feed(&mut sink, &mut store),
        ActionOutcome::Ignored(Rejection::ControlDisabled)
    );

    assert!(svc.clean(&mut sink, &mut store).is_applied());
    assert_eq!(sink.last_status(), Some("Kiwi needs Disciplining"));
    let controls = sink.last_controls().unwrap();
    assert!(!controls.feed && controls.discipline && !controls.clean);

    assert!(svc.discipline(&mut sink, &mut store).is_applied());
    assert_eq!(sink.last_status(), Some(""));
    assert!(sink.last_controls().unwrap().feed);
}

#[test]
fn clearing_an_absent_need_is_ignored() {
    let (mut svc, mut sink, mut store) = new_pet(PetConfig::default());
    assert_eq!(
        svc.discipline(&mut sink, &mut store),
        ActionOutcome::Ignored(Rejection::NoPendingNeed)
    );
}

// ── Minigame ──────────────────────────────────────────────────

#[test]
fn clock_pauses_during_minigame() {
    let (mut svc, mut sink, mut store) = new_pet(PetConfig::default());
    assert!(svc.start_minigame(&mut sink, &mut store).is_applied());
    ticks(&mut svc, 10, &mut sink, &mut store);
    assert_eq!(svc.pet().stat(Stat::Hunger), 100);
    assert_eq!(svc.clock_tick(), 11);

    assert!(
        svc.finish_minigame(MinigameOutcome::Lose, &mut sink, &mut store)
            .is_applied()
    );
    assert_eq!(svc.pet().stat(Stat::Happiness), 100);
    let controls = sink.last_controls().unwrap();
    assert!(controls.feed && controls.play && controls.sleep && !controls.medicate);
}

#[test]
fn finishing_without_a_game_is_ignored() {
    let (mut svc, mut sink, mut store) = new_pet(PetConfig::default());
    assert_eq!(
        svc.finish_minigame(MinigameOutcome::Win, &mut sink, &mut store),
        ActionOutcome::Ignored(Rejection::NoMinigame)
    );
}

#[test]
fn play_shows_current_stage_and_applies_win() {
    let (mut svc, mut sink, mut store) =
        restored(PetConfig::default(), "Kiwi\n100\n100\n30\nPink Theme\n3");
    let mut game = ScriptedMinigame::new(MinigameOutcome::Win);
    assert_eq!(
        svc.play(&mut game, &mut sink, &mut store),
        Ok(MinigameOutcome::Win)
    );
    assert_eq!(game.stages_seen, [3]);
    assert_eq!(svc.pet().stat(Stat::Happiness), 80);
}

// ── Ageing and death ──────────────────────────────────────────

#[test]
fn ageing_past_last_stage_kills_and_deletes_save() {
    let config = PetConfig {
        age_up_every: 1,
        ..PetConfig::default()
    };
    let (mut svc, mut sink, mut store) = restored(config, "Kiwi\n80\n80\n80\nDark Theme\n4");
    assert!(!store.is_empty());

    ticks(&mut svc, 1, &mut sink, &mut store);

    assert!(svc.pet().flags.is_dead);
    assert_eq!(svc.pet().age_stage, 4);
    assert!(store.is_empty());
    assert_eq!(sink.last_status(), Some("Kiwi has died"));
    let controls = sink.last_controls().unwrap();
    assert!(controls.menu && !controls.save && !controls.feed);
}

#[test]
fn ageing_advances_stage() {
    let config = PetConfig {
        age_up_every: 4,
        ..PetConfig::default()
    };
    let (mut svc, mut sink, mut store) = new_pet(config);
    ticks(&mut svc, 4, &mut sink, &mut store);
    assert_eq!(svc.pet().age_stage, 2);
    assert_eq!(sink.events.last(), Some(&PetNotification::StageChanged(2)));
}

#[test]
fn death_is_irreversible() {
    let config = PetConfig {
        age_up_every: 1,
        ..PetConfig::default()
    };
    let (mut svc, mut sink, mut store) = restored(config, "Kiwi\n80\n80\n80\nDark Theme\n4");
    ticks(&mut svc, 1, &mut sink, &mut store);
    let corpse = svc.pet().clone();

    for action in [
        UserAction::Feed,
        UserAction::Play,
        UserAction::Medicate,
        UserAction::Discipline,
        UserAction::Clean,
        UserAction::ToggleSleep,
    ] {
        assert_eq!(
            svc.handle_action(action, &mut sink, &mut store),
            ActionOutcome::Ignored(Rejection::Dead)
        );
    }
    ticks(&mut svc, 100, &mut sink, &mut store);
    assert_eq!(svc.pet(), &corpse);
    assert_eq!(sink.count(&PetNotification::Died), 1);
}

#[test]
fn zero_health_record_dies_on_start() {
    let (svc, sink, store) = restored(PetConfig::default(), "Kiwi\n0\n80\n80\nDark Theme\n2");
    assert_eq!(svc.phase(), Phase::Dead);
    assert_eq!(sink.count(&PetNotification::Died), 1);
    assert!(store.is_empty());
}

#[test]
fn failed_delete_on_death_is_not_fatal() {
    let record = SaveRecord::parse("Kiwi\n0\n80\n80\nDark Theme\n2", 4).unwrap();
    let mut sink = RecordingSink::new();
    let mut svc = PetService::from_record(PetConfig::default(), &record).unwrap();
    svc.start(&mut sink, &mut BrokenStore);
    assert_eq!(svc.phase(), Phase::Dead);
}

// ── Save ──────────────────────────────────────────────────────

#[test]
fn saved_message_yields_to_sickness_status() {
    let (mut svc, mut sink, mut store) = sick_pet();
    assert!(svc.save(&mut sink, &mut store).unwrap().is_some());
    assert_eq!(sink.last_status(), Some("File has been saved!"));

    svc.handle_pulse(Pulse::Clock, &mut sink, &mut store);
    assert_eq!(sink.last_status(), Some("Kiwi needs medicine."));
    assert_eq!(svc.status(), "Kiwi needs medicine.");
}

#[test]
fn save_failure_surfaces_as_error() {
    let (mut svc, mut sink, _) = new_pet(PetConfig::default());
    assert!(svc.save(&mut sink, &mut BrokenStore).is_err());
    assert_ne!(sink.last_status(), Some("File has been saved!"));
}

#[test]
fn snapshot_republishes_state() {
    let (svc, mut sink, _) = new_pet(PetConfig::default());
    sink.clear();
    svc.publish_snapshot(&mut sink);
    assert_eq!(sink.stat_updates(Stat::Health), [100]);
    assert!(sink.events.contains(&PetNotification::StageChanged(1)));
    assert!(sink.last_controls().is_some());
}
