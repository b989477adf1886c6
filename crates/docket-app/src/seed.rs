// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Static records each screen starts from when no backend is involved.

use time::{Date, Duration, Month};

use crate::{Record, RecordKey, ScreenKind};

/// Seed records for `screen`. Relative dates (last activity, upload dates)
/// are computed from `today`.
pub fn seed_records(screen: ScreenKind, today: Date) -> Vec<Record> {
    match screen {
        ScreenKind::Cases => cases(today),
        ScreenKind::Billing => payments(),
        ScreenKind::Appeals => appeals(),
        ScreenKind::Documents => documents(today),
        ScreenKind::Calendar => events(today),
        ScreenKind::CourtRooms => rooms(),
        ScreenKind::RegistrarCases => registrar_cases(),
        ScreenKind::RegistrarAppeals => registrar_appeals(),
    }
}

fn days_ago(today: Date, days: i64) -> Date {
    today.checked_sub(Duration::days(days)).unwrap_or(today)
}

fn may_2025(day: u8) -> Date {
    calendar(2025, Month::May, day)
}

fn calendar(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap_or(Date::MIN)
}

fn cases(today: Date) -> Vec<Record> {
    let case = |key: &str,
                name: &str,
                client: &str,
                opposing: &str,
                status: &str,
                days: i64,
                case_type: &str,
                court: &str,
                priority: &str| {
        Record::new(key)
            .with("caseName", name)
            .with("client", client)
            .with("opposingCounsel", opposing)
            .with("status", status)
            .with("lastActivity", days_ago(today, days))
            .with("caseType", case_type)
            .with("court", court)
            .with("priority", priority)
    };
    vec![
        case(
            "case1",
            "Smith v. Jones Construction LLC",
            "Johnathan P. Smith",
            "Jane R. Doe, Esq.",
            "Open",
            10,
            "Civil Litigation",
            "Superior Court, Anytown",
            "High",
        ),
        case(
            "case2",
            "Acme Corp v. Beta Innovations Inc.",
            "Acme Corporation (Rep: T. Stark)",
            "Robert \"Bob\" Paulson III",
            "Pending Discovery",
            5,
            "Intellectual Property",
            "Federal District Court",
            "Medium",
        ),
        case(
            "case3",
            "State of Confusion v. Michael \"Mikey\" Miller",
            "Michael Miller (Pro Bono)",
            "District Attorney's Office",
            "In Trial",
            1,
            "Criminal Defense",
            "Criminal Court, Div A",
            "Critical",
        ),
        case(
            "case4",
            "Chen Family Living Trust Admin",
            "Sarah Chen & Family",
            "N/A (Estate Planning)",
            "Closed - Archived",
            30,
            "Estate Planning",
            "N/A",
            "Low",
        ),
        case(
            "case5",
            "Innovate LLC Patent Dispute",
            "Innovate Dynamics LLC",
            "Global Tech Law Group LLP",
            "Open",
            2,
            "Patent Litigation",
            "USPTO PTAB",
            "High",
        ),
        case(
            "case6",
            "Real Estate Transaction - Miller Property",
            "The Miller Family",
            "Buyer's Counsel",
            "Pending Closing",
            15,
            "Real Estate",
            "N/A",
            "Medium",
        ),
    ]
}

fn payments() -> Vec<Record> {
    let payment = |index: usize,
                   date: Date,
                   case: &str,
                   description: &str,
                   amount: f64,
                   status: &str,
                   method: &str| {
        Record::new(RecordKey::from_index(index))
            .with("date", date)
            .with("caseName", case)
            .with("description", description)
            .with("amount", amount)
            .with("status", status)
            .with("method", method)
    };
    vec![
        payment(
            0,
            may_2025(8),
            "Innovate LLC Patent Dispute",
            "Monthly Retainer",
            2500.0,
            "Due",
            "N/A",
        ),
        payment(
            1,
            may_2025(7),
            "State of Confusion v. Miller",
            "Transcript Copy",
            75.0,
            "Pending",
            "N/A",
        ),
        payment(
            2,
            may_2025(4),
            "Smith v. Jones Construction",
            "Court Filing Fee",
            500.0,
            "Paid",
            "Credit Card",
        ),
        payment(
            3,
            calendar(2025, Month::April, 29),
            "Acme Corp v. Beta Innovations",
            "Expert Witness Retainer",
            1250.75,
            "Paid",
            "Bank Transfer",
        ),
        payment(
            4,
            calendar(2025, Month::April, 24),
            "Chen Family Trust Admin",
            "Consultation Fee",
            300.0,
            "Paid",
            "Credit Card",
        ),
    ]
}

fn appeals() -> Vec<Record> {
    let appeal = |index: usize,
                  date: Date,
                  case: &str,
                  kind: &str,
                  status: &str,
                  court: &str,
                  result: &str| {
        Record::new(RecordKey::from_index(index))
            .with("date", date)
            .with("caseName", case)
            .with("type", kind)
            .with("status", status)
            .with("court", court)
            .with("result", result)
    };
    vec![
        appeal(
            0,
            may_2025(10),
            "Innovate LLC Patent Dispute",
            "Civil",
            "Open",
            "Appellate Court",
            "N/A",
        ),
        appeal(
            1,
            may_2025(2),
            "Smith v. Jones Construction",
            "Criminal",
            "Pending",
            "Supreme Court",
            "N/A",
        ),
        appeal(
            2,
            calendar(2025, Month::April, 28),
            "Acme Corp v. Beta Innovations",
            "Civil",
            "Closed",
            "Appellate Court",
            "Granted",
        ),
        appeal(
            3,
            calendar(2025, Month::April, 20),
            "Chen Family Trust Admin",
            "Probate",
            "Closed",
            "Probate Appeals",
            "Denied",
        ),
    ]
}

fn documents(today: Date) -> Vec<Record> {
    let folder = |key: &str, name: &str, days: i64| {
        Record::new(key)
            .with("name", name)
            .with("type", "folder")
            .with("uploadDate", days_ago(today, days))
    };
    let file = |key: &str, name: &str, days: i64, kib: i64| {
        Record::new(key)
            .with("name", name)
            .with("type", "file")
            .with("uploadDate", days_ago(today, days))
            .with("size", kib * 1024)
    };
    vec![
        folder("doc1", "Zaina Life Forms", 5),
        file("doc2", "Case Brief - oop vs database.pdf", 2, 500),
        folder("doc3", "Extension Requests", 10),
        file("doc4", "Zaina Death Report.docx", 1, 1200),
        folder("doc5", "Murder Exhibits", 1),
        file("doc6", "Motion_to_Dismiss_Response.pdf", 0, 250),
        file("doc7", "Evidence_Photo_01.jpg", 4, 800),
        file("doc8", "Client_Correspondence.eml", 6, 50),
    ]
}

fn events(today: Date) -> Vec<Record> {
    let on_day = |day: u8| today.replace_day(day).unwrap_or(today);
    let event = |key: &str, title: &str, day: u8, time: &str, kind: &str, place: &str| {
        Record::new(key)
            .with("title", title)
            .with("date", on_day(day))
            .with("time", time)
            .with("type", kind)
            .with("location", place)
    };
    vec![
        event(
            "1",
            "Court Hearing - Smith v. Jones",
            10,
            "10:00 AM",
            "Court Date",
            "Courtroom 3B",
        ),
        event(
            "2",
            "Client Meeting - Sarah Chen",
            9,
            "2:30 PM",
            "Meeting",
            "Office Conference Room",
        ),
        event(
            "3",
            "Document Filing Deadline",
            11,
            "5:00 PM",
            "Deadline",
            "Online Portal",
        ),
    ]
}

fn rooms() -> Vec<Record> {
    let room = |id: i64, number: &str, name: &str, capacity: i64, kind: &str, status: &str| {
        Record::new(id)
            .with("number", number)
            .with("name", name)
            .with("capacity", capacity)
            .with("type", kind)
            .with("status", status)
    };
    vec![
        room(1, "101", "Justice Hall A", 75, "Trial Room", "Available"),
        room(2, "102", "Deliberation Chamber", 30, "Hearing Room", "Occupied"),
        room(3, "201", "Mediation Suite", 15, "Conference Room", "Maintenance"),
        room(4, "202", "Justice Hall B", 75, "Trial Room", "Available"),
        room(5, "301", "Judge Miller's Chambers", 5, "Chambers", "Reserved"),
    ]
}

fn registrar_cases() -> Vec<Record> {
    let case = |id: i64, number: &str, title: &str, parties: &str, kind: &str, status: &str| {
        Record::new(id)
            .with("number", number)
            .with("title", title)
            .with("parties", parties)
            .with("type", kind)
            .with("status", status)
    };
    vec![
        case(1, "CASE001", "State v. Smith", "State, Smith", "Criminal", "Open"),
        case(2, "CASE002", "People v. Doe", "People, Doe", "Civil", "Pending"),
        case(3, "CASE003", "Acme Corp v. Beta", "Acme, Beta", "Corporate", "Closed"),
    ]
}

fn registrar_appeals() -> Vec<Record> {
    let appeal = |id: i64,
                  number: &str,
                  case_id: &str,
                  appellant: &str,
                  respondent: &str,
                  filed: Date,
                  status: &str| {
        Record::new(id)
            .with("appealNumber", number)
            .with("originalCaseId", case_id)
            .with("appellant", appellant)
            .with("respondent", respondent)
            .with("dateFiled", filed)
            .with("status", status)
    };
    vec![
        appeal(
            1,
            "AP-2024-0034",
            "CASE001",
            "Johnathan Crane",
            "State of Metropolis",
            calendar(2024, Month::July, 1),
            "Under Review",
        ),
        appeal(
            2,
            "AP-2024-0035",
            "CASE004",
            "B. Allen",
            "City of Central",
            calendar(2024, Month::July, 15),
            "Hearing Scheduled",
        ),
        appeal(
            3,
            "AP-2023-0190",
            "CV-2023-0815",
            "Stark Industries",
            "Pym Technologies",
            calendar(2023, Month::November, 5),
            "Decided",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::seed_records;
    use crate::{ScreenKind, StatusFilter, Value, ViewState};
    use std::collections::BTreeSet;
    use time::{Date, Month};

    fn today() -> anyhow::Result<Date> {
        Ok(Date::from_calendar_date(2025, Month::May, 20)?)
    }

    #[test]
    fn every_seed_record_passes_its_form() -> anyhow::Result<()> {
        for screen in ScreenKind::ALL {
            let spec = screen.spec();
            for record in seed_records(screen, today()?) {
                spec.form
                    .validate(record.fields())
                    .map_err(|error| {
                        anyhow::anyhow!("{} {}: {error}", screen.as_str(), record.key())
                    })?;
            }
        }
        Ok(())
    }

    #[test]
    fn seed_keys_are_unique_per_screen() -> anyhow::Result<()> {
        for screen in ScreenKind::ALL {
            let records = seed_records(screen, today()?);
            let keys: BTreeSet<_> = records.iter().map(|record| record.key().clone()).collect();
            assert_eq!(keys.len(), records.len(), "{}", screen.as_str());
        }
        Ok(())
    }

    #[test]
    fn billing_dates_span_april_and_may() -> anyhow::Result<()> {
        let records = seed_records(ScreenKind::Billing, today()?);
        let first = records[0].get("date");
        let last = records[4].get("date");
        assert_eq!(
            first,
            Some(&Value::Date(Date::from_calendar_date(2025, Month::May, 8)?))
        );
        assert_eq!(
            last,
            Some(&Value::Date(Date::from_calendar_date(2025, Month::April, 24)?))
        );
        Ok(())
    }

    #[test]
    fn cases_default_view_puts_latest_activity_first() -> anyhow::Result<()> {
        let spec = ScreenKind::Cases.spec();
        let records = seed_records(ScreenKind::Cases, today()?);
        let visible = crate::visible_set(&records, &spec.view, &spec.default_view);
        assert_eq!(visible[0].key().as_str(), "case3");
        assert_eq!(visible[5].key().as_str(), "case4");
        Ok(())
    }

    #[test]
    fn pending_appeals_filter() -> anyhow::Result<()> {
        let spec = ScreenKind::Appeals.spec();
        let records = seed_records(ScreenKind::Appeals, today()?);
        let state = ViewState {
            status_filter: StatusFilter::Only("Pending".to_owned()),
            ..ViewState::default()
        };
        let visible = crate::visible_set(&records, &spec.view, &state);
        assert_eq!(visible.len(), 1);
        assert_eq!(
            visible[0].get("caseName"),
            Some(&Value::text("Smith v. Jones Construction"))
        );
        Ok(())
    }
}
