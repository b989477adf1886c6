// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use docket_app::{
    AppCommand, AppState, EditPhase, KeyAllocator, Record, RecordController, RecordError,
    ScreenKind, StatusFilter, seed_records,
};
use docket_testkit::{CaseFaker, fixture_date};

#[test]
fn create_round_trips_on_every_creatable_screen() -> Result<()> {
    let mut faker = CaseFaker::new(99);
    for screen in ScreenKind::ALL {
        let spec = screen.spec();
        if !spec.operations.create {
            continue;
        }
        let mut controller =
            RecordController::with_records(spec, seed_records(screen, fixture_date()))
                .with_keys(KeyAllocator::starting_at(1));
        let before = controller.records().len();
        let submitted = faker.record(screen).fields().clone();

        let key = controller.create(submitted.clone())?;
        controller.select(Some(key.clone()));

        assert_eq!(controller.records().len(), before + 1);
        assert_eq!(
            controller.selected(),
            Some(&Record::from_fields(key, submitted)),
            "{}",
            screen.as_str()
        );
    }
    Ok(())
}

#[test]
fn read_only_cases_reject_every_mutation() {
    let mut controller = RecordController::with_records(
        ScreenKind::Cases.spec(),
        seed_records(ScreenKind::Cases, fixture_date()),
    );
    assert!(matches!(
        controller.begin_create(),
        Err(RecordError::Unsupported { .. })
    ));
    let first = controller.records()[0].key().clone();
    assert!(matches!(
        controller.remove(&first),
        Err(RecordError::Unsupported { .. })
    ));
    assert_eq!(controller.records().len(), 6);
}

#[test]
fn registrar_room_lifecycle() -> Result<()> {
    let mut faker = CaseFaker::new(5);
    let mut controller = RecordController::with_records(
        ScreenKind::CourtRooms.spec(),
        seed_records(ScreenKind::CourtRooms, fixture_date()),
    )
    .with_keys(KeyAllocator::starting_at(1));

    controller.begin_create()?;
    for (field, value) in faker.room().fields().clone() {
        controller.set_field(&field, value)?;
    }
    let key = controller.save()?;
    assert_eq!(key.as_str(), "6");
    assert_eq!(controller.phase(), &EditPhase::Idle);

    controller.select(Some(key.clone()));
    controller.begin_edit()?;
    controller.set_field("status", "Maintenance")?;
    controller.save()?;
    let status = controller
        .get(&key)
        .and_then(|record| record.get("status"))
        .map(|value| value.display());
    assert_eq!(status.as_deref(), Some("Maintenance"));

    assert!(controller.remove(&key)?);
    assert!(!controller.remove(&key)?);
    assert_eq!(controller.records().len(), 5);
    Ok(())
}

#[test]
fn app_state_drives_the_visible_page() {
    let spec = ScreenKind::Billing.spec();
    let controller = RecordController::with_records(
        spec,
        seed_records(ScreenKind::Billing, fixture_date()),
    );
    let mut state = AppState::new(ScreenKind::Billing);

    state.dispatch(AppCommand::SetStatusFilter(StatusFilter::Only(
        "Paid".to_owned(),
    )));
    state.dispatch(AppCommand::SortBy("amount".to_owned()));
    state.dispatch(AppCommand::SortBy("amount".to_owned()));

    let amounts: Vec<String> = controller
        .visible(&state.view)
        .iter()
        .filter_map(|record| record.get("amount").map(|value| value.display()))
        .collect();
    assert_eq!(amounts, ["1250.75", "500", "300"]);
}
