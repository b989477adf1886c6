// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use docket_app::{Record, RecordKey, ScreenKind};
use std::path::PathBuf;
use time::{Date, Duration, Month};

const SURNAMES: [&str; 18] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young", "Diaz", "Reed",
    "Campbell", "Turner", "Flores", "Bennett", "Price", "Morris", "Foster", "Brooks",
];

const FIRST_NAMES: [&str; 16] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn", "Parker", "Drew",
    "Kai", "Elliot", "Robin", "Cameron", "Hayden", "Rowan",
];

const COMPANIES: [&str; 10] = [
    "Acme Corp",
    "Beta Innovations",
    "Stark Industries",
    "Pym Technologies",
    "Wayne Holdings",
    "Globex",
    "Initech",
    "Umbrella Partners",
    "Hooli",
    "Vandelay Imports",
];

const CASE_TYPES: [&str; 8] = [
    "Civil Litigation",
    "Intellectual Property",
    "Criminal Defense",
    "Estate Planning",
    "Patent Litigation",
    "Real Estate",
    "Family Law",
    "Employment",
];

const CASE_STATUSES: [&str; 6] = [
    "Open",
    "Pending Discovery",
    "In Trial",
    "Closed - Archived",
    "Pending Closing",
    "Settled",
];

const COURTS: [&str; 6] = [
    "Superior Court",
    "Federal District Court",
    "Appellate Court",
    "Supreme Court",
    "Probate Appeals",
    "Criminal Court, Div A",
];

const PRIORITIES: [&str; 4] = ["Critical", "High", "Medium", "Low"];
const BILLING_STATUSES: [&str; 3] = ["Due", "Pending", "Paid"];
const BILLING_ITEMS: [&str; 6] = [
    "Monthly Retainer",
    "Transcript Copy",
    "Court Filing Fee",
    "Expert Witness Retainer",
    "Consultation Fee",
    "Deposition Costs",
];
const PAYMENT_METHODS: [&str; 3] = ["Credit Card", "Bank Transfer", "N/A"];
const APPEAL_TYPES: [&str; 4] = ["Civil", "Criminal", "Probate", "Other"];
const APPEAL_STATUSES: [&str; 3] = ["Open", "Pending", "Closed"];
const APPEAL_RESULTS: [&str; 3] = ["N/A", "Granted", "Denied"];
const EVENT_TYPES: [&str; 4] = ["Court Date", "Deadline", "Meeting", "Task"];
const EVENT_TIMES: [&str; 5] = ["9:00 AM", "10:00 AM", "1:30 PM", "2:30 PM", "5:00 PM"];
const LOCATIONS: [&str; 4] = [
    "Courtroom 3B",
    "Office Conference Room",
    "Online Portal",
    "Chambers",
];
const DOCUMENT_EXTENSIONS: [&str; 5] = ["pdf", "docx", "jpg", "eml", "xlsx"];
const ROOM_TYPES: [&str; 4] = ["Trial Room", "Hearing Room", "Conference Room", "Chambers"];
const ROOM_STATUSES: [&str; 4] = ["Available", "Occupied", "Maintenance", "Reserved"];
const REGISTRAR_STATUSES: [&str; 3] = ["Open", "Pending", "Closed"];
const REGISTRAR_TYPES: [&str; 3] = ["Criminal", "Civil", "Corporate"];
const REGISTRAR_APPEAL_STATUSES: [&str; 3] = ["Under Review", "Hearing Scheduled", "Decided"];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Deterministic generator of plausible records for every screen. The same
/// seed always yields the same sequence.
#[derive(Debug, Clone)]
pub struct CaseFaker {
    rng: DeterministicRng,
    next_id: i64,
}

impl CaseFaker {
    pub fn new(seed: u64) -> Self {
        let normalized = if seed == 0 { 1 } else { seed };
        Self {
            rng: DeterministicRng::new(normalized),
            next_id: 1,
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    /// One record shaped for `screen` whose fields satisfy that screen's form.
    pub fn record(&mut self, screen: ScreenKind) -> Record {
        match screen {
            ScreenKind::Cases => self.case_record(),
            ScreenKind::Billing => self.payment(),
            ScreenKind::Appeals => self.appeal(),
            ScreenKind::Documents => self.document(),
            ScreenKind::Calendar => self.event(),
            ScreenKind::CourtRooms => self.room(),
            ScreenKind::RegistrarCases => self.registrar_case(),
            ScreenKind::RegistrarAppeals => self.registrar_appeal(),
        }
    }

    pub fn records(&mut self, screen: ScreenKind, count: usize) -> Vec<Record> {
        (0..count).map(|_| self.record(screen)).collect()
    }

    pub fn case_record(&mut self) -> Record {
        let key = self.next_key();
        Record::new(key)
            .with("caseName", self.case_name())
            .with("client", self.person())
            .with("opposingCounsel", format!("{}, Esq.", self.person()))
            .with("status", self.pick(&CASE_STATUSES))
            .with("lastActivity", self.date_within(90))
            .with("caseType", self.pick(&CASE_TYPES))
            .with("court", self.pick(&COURTS))
            .with("priority", self.pick(&PRIORITIES))
    }

    pub fn payment(&mut self) -> Record {
        let key = self.next_key();
        let cents = self.int_range(1_000, 500_000);
        Record::new(key)
            .with("date", self.date_within(60))
            .with("caseName", self.case_name())
            .with("description", self.pick(&BILLING_ITEMS))
            .with("amount", cents as f64 / 100.0)
            .with("status", self.pick(&BILLING_STATUSES))
            .with("method", self.pick(&PAYMENT_METHODS))
    }

    pub fn appeal(&mut self) -> Record {
        let key = self.next_key();
        Record::new(key)
            .with("date", self.date_within(60))
            .with("caseName", self.case_name())
            .with("type", self.pick(&APPEAL_TYPES))
            .with("status", self.pick(&APPEAL_STATUSES))
            .with("court", self.pick(&COURTS))
            .with("result", self.pick(&APPEAL_RESULTS))
    }

    pub fn document(&mut self) -> Record {
        let key = self.next_key();
        let stem = self.pick(&SURNAMES);
        let record = Record::new(key).with("uploadDate", self.date_within(30));
        if self.rng.int_n(4) == 0 {
            record
                .with("name", format!("{stem} Exhibits"))
                .with("type", "folder")
        } else {
            let extension = self.pick(&DOCUMENT_EXTENSIONS);
            record
                .with("name", format!("{stem}_Brief.{extension}"))
                .with("type", "file")
                .with("size", self.int_range(1, 2048) * 1024)
        }
    }

    pub fn event(&mut self) -> Record {
        let key = self.next_key();
        Record::new(key)
            .with("title", format!("Hearing - {}", self.case_name()))
            .with("date", self.date_within(28))
            .with("time", self.pick(&EVENT_TIMES))
            .with("type", self.pick(&EVENT_TYPES))
            .with("location", self.pick(&LOCATIONS))
    }

    pub fn room(&mut self) -> Record {
        let key = self.next_key();
        let floor = self.int_range(1, 4);
        let door = self.int_range(1, 20);
        Record::new(key)
            .with("number", format!("{floor}{door:02}"))
            .with("name", format!("{} Hall", self.pick(&SURNAMES)))
            .with("capacity", self.int_range(5, 120))
            .with("type", self.pick(&ROOM_TYPES))
            .with("status", self.pick(&ROOM_STATUSES))
    }

    pub fn registrar_case(&mut self) -> Record {
        let key = self.next_key();
        let plaintiff = self.pick(&COMPANIES);
        let defendant = self.pick(&SURNAMES);
        Record::new(key)
            .with("number", format!("CASE{:03}", self.int_range(1, 999)))
            .with("title", format!("{plaintiff} v. {defendant}"))
            .with("parties", format!("{plaintiff}, {defendant}"))
            .with("type", self.pick(&REGISTRAR_TYPES))
            .with("status", self.pick(&REGISTRAR_STATUSES))
    }

    pub fn registrar_appeal(&mut self) -> Record {
        let key = self.next_key();
        Record::new(key)
            .with(
                "appealNumber",
                format!("AP-2024-{:04}", self.int_range(1, 9999)),
            )
            .with("originalCaseId", format!("CASE{:03}", self.int_range(1, 999)))
            .with("appellant", self.person())
            .with("respondent", self.pick(&COMPANIES))
            .with("dateFiled", self.date_within(365))
            .with("status", self.pick(&REGISTRAR_APPEAL_STATUSES))
    }

    fn next_key(&mut self) -> RecordKey {
        let key = RecordKey::from(self.next_id);
        self.next_id += 1;
        key
    }

    fn case_name(&mut self) -> String {
        if self.rng.int_n(2) == 0 {
            format!("{} v. {}", self.pick(&COMPANIES), self.pick(&COMPANIES))
        } else {
            format!("State v. {}", self.pick(&SURNAMES))
        }
    }

    fn person(&mut self) -> String {
        format!("{} {}", self.pick(&FIRST_NAMES), self.pick(&SURNAMES))
    }

    fn date_within(&mut self, days: i64) -> Date {
        let offset = self.int_range(0, days);
        fixture_date()
            .checked_sub(Duration::days(offset))
            .unwrap_or_else(fixture_date)
    }

    fn pick<'a>(&mut self, items: &'a [&'a str]) -> &'a str {
        items[self.rng.int_n(items.len())]
    }

    fn int_range(&mut self, min: i64, max: i64) -> i64 {
        if max <= min {
            return min;
        }
        let span = max - min + 1;
        min + (self.rng.next_u64() % (span as u64)) as i64
    }
}

pub fn temp_db_path() -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir().context("create temp dir")?;
    let db_path = dir.path().join("docket.db");
    Ok((dir, db_path))
}

/// "Today" used by fixtures so relative dates are reproducible.
pub fn fixture_date() -> Date {
    Date::from_calendar_date(2025, Month::May, 20).unwrap_or(Date::MIN)
}

pub fn fixture_datetime() -> &'static str {
    "2025-05-20T12:34:56Z"
}
