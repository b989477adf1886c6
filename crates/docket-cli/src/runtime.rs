// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, bail};
use docket_api::Client;
use docket_app::{
    AppState, ModeStrategy, Record, RecordController, RecordKey, ScreenKind, Submission,
    paginate, seed_records,
};
use std::collections::BTreeMap;
use std::fmt::Write as _;
use time::Date;
use tracing::{debug, info, warn};

/// One screen's records plus the backend wiring the mode strategy allows.
pub struct Session {
    strategy: ModeStrategy,
    client: Option<Client>,
    controller: RecordController,
}

impl Session {
    /// Online sessions fetch screens that have a backend resource and fail on
    /// network errors or a missing client. Demo sessions and resource-less
    /// screens start from the seed data.
    pub fn open(
        screen: ScreenKind,
        strategy: ModeStrategy,
        client: Option<Client>,
        today: Date,
    ) -> Result<Self> {
        let spec = screen.spec();
        let remote = match (strategy, &spec.resource, &client) {
            (ModeStrategy::Online, Some(resource), Some(client)) => {
                let records = client.list(resource, &spec.form).with_context(|| {
                    format!("load {} from {}", screen.label(), client.base_url())
                })?;
                Some(records)
            }
            (ModeStrategy::Online, Some(_), None) => bail!(
                "online mode needs an API client to load {}; set [api] base_url or pass --demo",
                screen.label()
            ),
            _ => None,
        };

        let records = match remote {
            Some(records) => {
                info!(
                    screen = screen.as_str(),
                    count = records.len(),
                    "loaded records from backend"
                );
                records
            }
            None => {
                debug!(
                    screen = screen.as_str(),
                    strategy = strategy.as_str(),
                    "using seed records"
                );
                seed_records(screen, today)
            }
        };

        Ok(Self {
            strategy,
            client,
            controller: RecordController::with_records(spec, records),
        })
    }

    pub fn controller(&self) -> &RecordController {
        &self.controller
    }

    /// Parses raw form input, validates it and creates the record, posting
    /// it to the backend first when the screen has one.
    pub fn create(&mut self, raw: &BTreeMap<String, String>) -> Result<RecordKey> {
        self.controller.begin_create()?;
        let parsed = self.controller.spec().form.parse_input(raw);
        let fields = match parsed {
            Ok(fields) => fields,
            Err(error) => {
                self.controller.cancel();
                return Err(error.into());
            }
        };
        for (field, value) in fields {
            self.controller.set_field(&field, value)?;
        }

        let submission = match self.controller.begin_submit() {
            Ok(submission) => submission,
            Err(error) => {
                self.controller.cancel();
                return Err(error.into());
            }
        };
        self.submit(submission)
    }

    fn submit(&mut self, submission: Submission) -> Result<RecordKey> {
        let spec = self.controller.spec();
        let (Some(resource), Some(client)) = (spec.resource.clone(), self.client.as_ref()) else {
            return Ok(self.controller.finish_submit(submission, None)?);
        };

        let screen = spec.kind;
        let sent = match &submission.target {
            None => client.create(&resource, &spec.form, &submission.fields),
            Some(key) => client.update(&resource, &spec.form, key, &submission.fields),
        };

        match sent {
            Ok(echo) => Ok(self.controller.finish_submit(submission, echo)?),
            Err(error) if self.strategy == ModeStrategy::Demo => {
                warn!(
                    screen = screen.as_str(),
                    error = %error,
                    "backend unavailable; demo mode accepted the record locally"
                );
                Ok(self.controller.finish_submit(submission, None)?)
            }
            Err(error) => {
                self.controller.abort_submit();
                self.controller.cancel();
                Err(error).with_context(|| format!("save {} record", screen.label()))
            }
        }
    }

    /// Pages the current view spans, for clamping a requested page.
    pub fn page_count(&self, state: &AppState, page_size: usize) -> usize {
        let visible = self.controller.visible(&state.view);
        paginate(&visible, 0, page_size).page_count
    }

    pub fn render(&self, state: &AppState, page_size: usize) -> String {
        let spec = self.controller.spec();
        let visible = self.controller.visible(&state.view);
        let page = paginate(&visible, state.page, page_size);

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} ({} of {} records, page {}/{})",
            spec.kind.label(),
            page.total,
            self.controller.records().len(),
            page.page + 1,
            page.page_count
        );

        let labels: Vec<String> = self
            .controller
            .status_options()
            .iter()
            .map(|option| option.label().to_owned())
            .collect();
        let _ = writeln!(out, "Status: {}", labels.join(" | "));

        if page.items.is_empty() {
            let _ = writeln!(out, "{}", spec.empty_message);
            return out;
        }

        let mut header = vec!["key".to_owned()];
        header.extend(spec.columns.iter().map(|column| (*column).to_owned()));
        let rows: Vec<Vec<String>> = page
            .items
            .iter()
            .map(|record| self.row(record))
            .collect();
        out.push_str(&format_table(&header, &rows));
        out
    }

    fn row(&self, record: &Record) -> Vec<String> {
        let spec = self.controller.spec();
        let status_field = spec.view.status_field.as_deref();
        let mut cells = vec![record.key().to_string()];
        cells.extend(spec.columns.iter().map(|column| {
            let text = record
                .get(column)
                .map(|value| value.display())
                .unwrap_or_default();
            if Some(*column) == status_field && !text.is_empty() {
                format!("{text} [{}]", spec.badge_tone(&text).as_str())
            } else {
                text
            }
        }));
        cells
    }
}

/// Parses `field=value` pairs from the command line into raw form input.
pub fn parse_field_args(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    pairs
        .iter()
        .map(|pair| {
            let (field, value) = pair.split_once('=').with_context(|| {
                format!("expected name=value, got {pair:?}")
            })?;
            Ok((field.trim().to_owned(), value.to_owned()))
        })
        .collect()
}

fn format_table(header: &[String], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|cell| cell.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    for row in std::iter::once(header).chain(rows.iter().map(Vec::as_slice)) {
        let line = row
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{Session, format_table, parse_field_args};
    use anyhow::Result;
    use docket_api::Client;
    use docket_app::{AppCommand, AppState, ModeStrategy, ScreenKind, StatusFilter};
    use std::collections::BTreeMap;
    use std::thread;
    use std::time::Duration;
    use time::{Date, Month};
    use tiny_http::{Header, Response, Server};

    fn today() -> Result<Date> {
        Ok(Date::from_calendar_date(2025, Month::May, 20)?)
    }

    fn raw(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(field, value)| ((*field).to_owned(), (*value).to_owned()))
            .collect()
    }

    fn unreachable_client() -> Result<Client> {
        Client::new("http://127.0.0.1:1/api", None, Duration::from_millis(50))
    }

    #[test]
    fn demo_session_uses_seed_records() -> Result<()> {
        let session = Session::open(ScreenKind::Billing, ModeStrategy::Demo, None, today()?)?;
        assert_eq!(session.controller().records().len(), 5);
        Ok(())
    }

    #[test]
    fn online_session_surfaces_network_errors() -> Result<()> {
        let error = match Session::open(
            ScreenKind::Billing,
            ModeStrategy::Online,
            Some(unreachable_client()?),
            today()?,
        ) {
            Ok(_) => anyhow::bail!("online session should fail without a backend"),
            Err(error) => error,
        };
        assert!(format!("{error:#}").contains("load Billing"));
        Ok(())
    }

    #[test]
    fn online_screens_without_a_resource_use_seed_records() -> Result<()> {
        let session = Session::open(
            ScreenKind::CourtRooms,
            ModeStrategy::Online,
            Some(unreachable_client()?),
            today()?,
        )?;
        assert_eq!(session.controller().records().len(), 5);
        Ok(())
    }

    #[test]
    fn online_session_without_a_client_is_refused() -> Result<()> {
        let error = match Session::open(ScreenKind::Billing, ModeStrategy::Online, None, today()?)
        {
            Ok(_) => anyhow::bail!("online billing should not fall back to seed data"),
            Err(error) => error,
        };
        assert!(error.to_string().contains("--demo"));

        let rooms = Session::open(ScreenKind::CourtRooms, ModeStrategy::Online, None, today()?)?;
        assert_eq!(rooms.controller().records().len(), 5);
        Ok(())
    }

    #[test]
    fn demo_create_is_accepted_when_backend_fails() -> Result<()> {
        let mut session = Session::open(
            ScreenKind::Billing,
            ModeStrategy::Demo,
            Some(unreachable_client()?),
            today()?,
        )?;
        let key = session.create(&raw(&[
            ("date", "2025-05-21"),
            ("caseName", "Doe v. Roe"),
            ("description", "Copies"),
            ("amount", "42"),
        ]))?;
        assert_eq!(session.controller().records().len(), 6);
        assert!(session.controller().get(&key).is_some());
        assert!(!session.controller().is_submitting());
        Ok(())
    }

    #[test]
    fn online_create_failure_leaves_store_unchanged() -> Result<()> {
        let server = Server::http("127.0.0.1:0")
            .map_err(|error| anyhow::anyhow!("start mock server: {error}"))?;
        let addr = format!("http://{}/api", server.server_addr());
        let handle = thread::spawn(move || {
            let request = server.recv().expect("list request expected");
            let body = r#"{"status": "success", "payments": []}"#;
            request
                .respond(
                    Response::from_string(body).with_header(
                        Header::from_bytes("Content-Type", "application/json")
                            .expect("valid content type header"),
                    ),
                )
                .expect("response should succeed");
            let request = server.recv().expect("create request expected");
            request
                .respond(
                    Response::from_string(r#"{"message": "Missing required fields"}"#)
                        .with_status_code(400),
                )
                .expect("response should succeed");
        });

        let client = Client::new(&addr, None, Duration::from_secs(1))?;
        let mut session =
            Session::open(ScreenKind::Billing, ModeStrategy::Online, Some(client), today()?)?;
        let error = session
            .create(&raw(&[
                ("date", "2025-05-21"),
                ("caseName", "Doe v. Roe"),
                ("description", "Copies"),
                ("amount", "42"),
            ]))
            .expect_err("create should fail");
        assert!(format!("{error:#}").contains("Missing required fields"));
        assert!(session.controller().records().is_empty());
        assert!(!session.controller().is_submitting());

        handle.join().expect("server thread should join");
        Ok(())
    }

    #[test]
    fn invalid_input_is_rejected_before_submit() -> Result<()> {
        let mut session = Session::open(ScreenKind::Appeals, ModeStrategy::Demo, None, today()?)?;
        let error = session
            .create(&raw(&[("date", "2025-05-21"), ("caseName", "  ")]))
            .expect_err("blank case name should fail");
        assert!(error.to_string().contains("Case Name"));
        assert_eq!(session.controller().records().len(), 4);
        assert!(session.controller().draft().is_none());
        Ok(())
    }

    #[test]
    fn render_shows_status_options_and_empty_message() -> Result<()> {
        let session = Session::open(ScreenKind::Billing, ModeStrategy::Demo, None, today()?)?;
        let mut state = AppState::new(ScreenKind::Billing);
        let rendered = session.render(&state, 25);
        assert!(rendered.starts_with("Billing (5 of 5 records, page 1/1)"));
        assert!(rendered.contains("Status: All | Due | Pending | Paid"));
        assert!(rendered.contains("[success]"));

        state.dispatch(AppCommand::SetStatusFilter(StatusFilter::Only(
            "Refunded".to_owned(),
        )));
        let rendered = session.render(&state, 25);
        assert!(rendered.contains("No payments found."));
        Ok(())
    }

    #[test]
    fn out_of_range_pages_clamp_to_the_last_page() -> Result<()> {
        let session = Session::open(ScreenKind::Cases, ModeStrategy::Demo, None, today()?)?;
        let mut state = AppState::new(ScreenKind::Cases);
        for _ in 0..9 {
            state.dispatch(AppCommand::NextPage);
        }
        assert_eq!(state.page, 9);

        state.clamp_page(session.page_count(&state, 4));
        assert_eq!(state.page, 1);
        assert!(session.render(&state, 4).starts_with("My Cases (6 of 6 records, page 2/2)"));

        state.dispatch(AppCommand::SetStatusFilter(StatusFilter::Only(
            "Nonexistent".to_owned(),
        )));
        state.clamp_page(session.page_count(&state, 4));
        assert_eq!(state.page, 0);
        Ok(())
    }

    #[test]
    fn field_args_split_on_first_equals() -> Result<()> {
        let parsed = parse_field_args(&["title=A=B".to_owned(), "time=10:00".to_owned()])?;
        assert_eq!(parsed.get("title").map(String::as_str), Some("A=B"));
        assert_eq!(parsed.get("time").map(String::as_str), Some("10:00"));
        assert!(parse_field_args(&["title".to_owned()]).is_err());
        Ok(())
    }

    #[test]
    fn table_columns_align() {
        let header = vec!["key".to_owned(), "name".to_owned()];
        let rows = vec![
            vec!["1".to_owned(), "Main Courtroom".to_owned()],
            vec!["22".to_owned(), "B".to_owned()],
        ];
        assert_eq!(
            format_table(&header, &rows),
            "key  name\n1    Main Courtroom\n22   B\n"
        );
    }
}
