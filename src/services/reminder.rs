// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily birthday reminder job.
//!
//! One background task sleeps until the configured HH:MM local time, scans
//! for birthdays falling on tomorrow's calendar date, and emails a single
//! reminder listing all of them. There is deliberately no "already sent
//! today" state: running the job twice on the same day (for example around
//! a reschedule) sends the reminder twice.

use chrono::{Datelike, DateTime, Days, Local, NaiveDate};
use std::sync::Mutex;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::models::{Birthday, EmailSettings};
use crate::services::ai::{AiClient, AiSuggestions};
use crate::services::mailer::Mailer;
use crate::store::{BirthdayStore, SettingsStore};

/// Fallback when `settings.reminder_time` is malformed.
const DEFAULT_REMINDER_TIME: (u32, u32) = (9, 0);

/// Everything one reminder pass needs, cloneable into the background task.
#[derive(Clone)]
pub struct ReminderContext {
    pub birthdays: BirthdayStore,
    pub settings: SettingsStore,
    pub mailer: Mailer,
    pub ai: AiClient,
}

/// What a single reminder pass did; the job loop only logs it, tests
/// assert on it.
#[derive(Debug, PartialEq, Eq)]
pub enum ReminderOutcome {
    /// Notifications are switched off.
    Disabled,
    /// No recipients configured.
    NoRecipients,
    /// Nothing due tomorrow.
    NoMatches,
    /// Test mode: composed email was logged, not sent.
    LoggedTestMode,
    /// Email was handed to the mailer; the flag is the mailer's verdict.
    Sent(bool),
    /// Storage failed; nothing was attempted.
    StorageFailed,
}

/// Owns the single live reminder job.
///
/// `start` is a no-op when a job is already running and `stop` is
/// idempotent; rescheduling is teardown-then-init, so there are never two
/// live jobs.
#[derive(Default)]
pub struct ReminderScheduler {
    job: Mutex<Option<JoinHandle<()>>>,
}

impl ReminderScheduler {
    /// Spawn the daily job at the currently configured reminder time.
    pub fn start(&self, ctx: ReminderContext) {
        let mut job = self
            .job
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if job.is_some() {
            tracing::warn!("Reminder scheduler already running");
            return;
        }

        let configured = ctx
            .settings
            .get_email_settings()
            .map(|s| s.reminder_time)
            .unwrap_or_default();
        let (hour, minute) = parse_reminder_time(&configured).unwrap_or_else(|| {
            tracing::warn!(value = %configured, "Invalid reminder_time format, using 09:00");
            DEFAULT_REMINDER_TIME
        });

        *job = Some(tokio::spawn(async move {
            loop {
                let wait = until_next_run(hour, minute, Local::now());
                tokio::time::sleep(wait).await;
                let outcome = check_and_send_reminders(&ctx).await;
                tracing::debug!(?outcome, "Reminder pass finished");
            }
        }));

        tracing::info!(
            "Birthday reminder scheduler started (checks daily at {hour:02}:{minute:02})"
        );
    }

    /// Tear down the running job, if any.
    pub fn stop(&self) {
        let handle = self
            .job
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(handle) = handle {
            handle.abort();
            tracing::info!("Reminder scheduler stopped");
        }
    }

    /// Re-read the configured time and restart the job (called when
    /// notification settings change).
    pub fn reschedule(&self, ctx: ReminderContext) {
        self.stop();
        self.start(ctx);
    }
}

/// Calculate age in the given calendar year. No adjustment for whether the
/// birthday has occurred yet; birth years in the future yield negative ages.
pub fn calculate_age(birth_year: i32, current_year: i32) -> i32 {
    current_year - birth_year
}

/// Parse "HH:MM"; `None` for anything malformed or out of range.
pub fn parse_reminder_time(value: &str) -> Option<(u32, u32)> {
    let (hour, minute) = value.split_once(':')?;
    let hour: u32 = hour.trim().parse().ok()?;
    let minute: u32 = minute.trim().parse().ok()?;
    (hour < 24 && minute < 60).then_some((hour, minute))
}

/// Time until the next occurrence of `hour:minute` local time.
pub fn until_next_run(hour: u32, minute: u32, now: DateTime<Local>) -> Duration {
    let Some(today_run) = now.date_naive().and_hms_opt(hour, minute, 0) else {
        return Duration::from_secs(24 * 60 * 60);
    };
    let target = if today_run <= now.naive_local() {
        today_run + Days::new(1)
    } else {
        today_run
    };
    (target - now.naive_local()).to_std().unwrap_or_default()
}

/// Records due on the given calendar date. Records without a day are never
/// selected, whatever their month; the year is ignored.
pub fn birthdays_on(birthdays: &[Birthday], month: u32, day: u32) -> Vec<&Birthday> {
    birthdays
        .iter()
        .filter(|b| b.month == month && b.day == Some(day))
        .collect()
}

/// Soonest future occurrence (today counts) of a month/day, skipping years
/// where the date does not exist (Feb 29).
pub fn next_occurrence(today: NaiveDate, month: u32, day: u32) -> Option<NaiveDate> {
    (0..=8)
        .filter_map(|offset| NaiveDate::from_ymd_opt(today.year() + offset, month, day))
        .find(|date| *date >= today)
}

/// A composed reminder, ready for the mailer.
#[derive(Debug)]
pub struct ReminderEmail {
    pub subject: String,
    pub body: String,
    pub matched: usize,
}

/// Compose the single reminder email for all birthdays falling on `date`.
/// Returns `None` when nothing matches. AI content is fetched per matched
/// record and silently skipped when unavailable.
pub async fn build_reminder_email(
    all: &[Birthday],
    date: NaiveDate,
    settings: &EmailSettings,
    ai: &AiClient,
) -> Option<ReminderEmail> {
    let upcoming = birthdays_on(all, date.month(), date.day());
    if upcoming.is_empty() {
        return None;
    }

    let subject = format!(
        "Birthday Reminder - {} birthday(s) tomorrow",
        upcoming.len()
    );

    let mut body = String::from("<html><body>\n");
    body.push_str(&format!(
        "<h2>🎂 Birthday Reminder for {}</h2>\n",
        date.format("%B %d, %Y")
    ));
    body.push_str("<p>The following people have birthdays tomorrow:</p>\n<ul>\n");

    for birthday in &upcoming {
        let age = birthday
            .birth_year
            .map(|year| calculate_age(year, date.year()));

        body.push_str(&format!("<li><strong>{}</strong>", birthday.name));
        if let Some(age) = age {
            body.push_str(&format!(" (turning {age})"));
        }
        if let Some(note) = &birthday.note {
            body.push_str(&format!(" - <i>{note}</i>"));
        }

        if settings.ai_enabled && !settings.openai_api_key.is_empty() {
            if let Some(suggestions) = ai
                .suggest(
                    &birthday.name,
                    age,
                    birthday.note.as_deref(),
                    &settings.openai_api_key,
                )
                .await
            {
                append_ai_content(&mut body, &suggestions);
            }
        }

        body.push_str("</li>\n");
    }

    body.push_str(
        "</ul>\n<p><small>This is an automated reminder from your Birthday Tracker.</small></p>\n\
         </body></html>",
    );

    Some(ReminderEmail {
        subject,
        body,
        matched: upcoming.len(),
    })
}

/// Append the AI message and gift list to one list item.
pub fn append_ai_content(body: &mut String, suggestions: &AiSuggestions) {
    if !suggestions.message.is_empty() {
        body.push_str(&format!("<br><br><em>💭 {}</em>", suggestions.message));
    }
    if !suggestions.gifts.is_empty() {
        body.push_str("<br><br><strong>🎁 Gift Ideas:</strong><ul style='margin-top: 5px;'>");
        for gift in &suggestions.gifts {
            body.push_str(&format!("<li>{gift}</li>"));
        }
        body.push_str("</ul>");
    }
}

/// Run one reminder pass. Never propagates errors: whatever this run hits,
/// the job stays scheduled for the next day.
pub async fn check_and_send_reminders(ctx: &ReminderContext) -> ReminderOutcome {
    let settings = match ctx.settings.get_email_settings() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!(error = %err, "Failed to load email settings");
            return ReminderOutcome::StorageFailed;
        }
    };

    if !settings.enabled {
        tracing::debug!("Email notifications disabled");
        return ReminderOutcome::Disabled;
    }
    if settings.recipients.is_empty() {
        tracing::warn!("No email recipients configured");
        return ReminderOutcome::NoRecipients;
    }

    let all = match ctx.birthdays.get_all() {
        Ok(all) => all,
        Err(err) => {
            tracing::error!(error = %err, "Failed to load birthdays");
            return ReminderOutcome::StorageFailed;
        }
    };

    let tomorrow = Local::now().date_naive() + Days::new(1);
    let Some(email) = build_reminder_email(&all, tomorrow, &settings, &ctx.ai).await else {
        tracing::debug!(
            month = tomorrow.month(),
            day = tomorrow.day(),
            "No birthdays tomorrow"
        );
        return ReminderOutcome::NoMatches;
    };

    let outcome = if settings.test_mode {
        tracing::info!(
            recipients = ?settings.recipients,
            subject = %email.subject,
            body = %email.body,
            "Test mode enabled - email would be sent"
        );
        ReminderOutcome::LoggedTestMode
    } else {
        let sent = ctx
            .mailer
            .send(&email.subject, &email.body, &settings.recipients, &settings)
            .await;
        ReminderOutcome::Sent(sent)
    };

    tracing::info!(count = email.matched, "Processed birthday reminders");
    outcome
}
