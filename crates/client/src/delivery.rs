//! Delivery scheduling: eligible dates and time-slot filtering.
//!
//! The store delivers only on certain weekdays, fetched from the backend per
//! session. The resolver scans forward from today (exclusive) and returns up
//! to four eligible dates within a 30-day horizon. When the backend is
//! unreachable the store's historical schedule (Monday and Thursday) is used
//! so checkout still works offline.
//!
//! Same-day slots need a 2-hour lead: when the chosen date is today, slots
//! whose start hour is less than `current hour + 2` are dropped.

use chrono::{Datelike, NaiveDate, Timelike, Utc, Weekday};
use serde::Serialize;
use tracing::instrument;

use crate::api::ApiClient;
use crate::error::Result;

/// Maximum number of delivery dates offered.
pub const MAX_DELIVERY_DATES: usize = 4;

/// How far ahead to scan for eligible dates, in days.
pub const SCAN_HORIZON_DAYS: i64 = 30;

/// Minimum hours between "now" and a same-day slot's start.
pub const SAME_DAY_LEAD_HOURS: u32 = 2;

/// Schedule used when the backend cannot be reached.
pub const FALLBACK_WEEKDAYS: [Weekday; 2] = [Weekday::Mon, Weekday::Thu];

/// A selectable delivery date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryDay {
    /// The calendar date.
    pub date: NaiveDate,
    /// Human label, e.g. `"Mon, Sep 1"`.
    pub label: String,
    /// ISO form (`YYYY-MM-DD`) used in backend requests.
    pub iso_date: String,
    /// True for the earliest offered date.
    pub is_closest: bool,
}

impl DeliveryDay {
    fn from_date(date: NaiveDate, is_closest: bool) -> Self {
        Self {
            label: date.format("%a, %b %-d").to_string(),
            iso_date: date.format("%Y-%m-%d").to_string(),
            date,
            is_closest,
        }
    }
}

/// Map backend weekday numbers (1=Mon..7=Sun) to [`Weekday`], skipping
/// anything out of range.
#[must_use]
pub fn weekdays_from_numbers(numbers: &[u8]) -> Vec<Weekday> {
    numbers
        .iter()
        .filter_map(|n| match n {
            1 => Some(Weekday::Mon),
            2 => Some(Weekday::Tue),
            3 => Some(Weekday::Wed),
            4 => Some(Weekday::Thu),
            5 => Some(Weekday::Fri),
            6 => Some(Weekday::Sat),
            7 => Some(Weekday::Sun),
            _ => None,
        })
        .collect()
}

/// Collect the next eligible delivery dates after `today`.
///
/// Scans day by day from `today` exclusive up to [`SCAN_HORIZON_DAYS`],
/// keeping dates whose weekday is in `active`, until
/// [`MAX_DELIVERY_DATES`] are found. An empty active set yields an empty
/// list (never an infinite scan).
#[must_use]
pub fn next_delivery_dates(today: NaiveDate, active: &[Weekday]) -> Vec<NaiveDate> {
    let mut dates = Vec::with_capacity(MAX_DELIVERY_DATES);
    for offset in 1..=SCAN_HORIZON_DAYS {
        if dates.len() == MAX_DELIVERY_DATES {
            break;
        }
        let Some(candidate) = today.checked_add_days(chrono::Days::new(offset.unsigned_abs()))
        else {
            break;
        };
        if active.contains(&candidate.weekday()) {
            dates.push(candidate);
        }
    }
    dates
}

/// Build the selectable [`DeliveryDay`] list, marking the first as closest.
#[must_use]
pub fn delivery_days(today: NaiveDate, active: &[Weekday]) -> Vec<DeliveryDay> {
    next_delivery_dates(today, active)
        .into_iter()
        .enumerate()
        .map(|(i, date)| DeliveryDay::from_date(date, i == 0))
        .collect()
}

/// Parse the start hour (0-23) out of a slot label like
/// `"9:00 AM - 1:00 PM"`. Returns `None` for labels that don't match.
#[must_use]
pub fn slot_start_hour(label: &str) -> Option<u32> {
    let start = label.split('-').next()?.trim();
    let (time, meridiem) = start.split_once(' ')?;
    let hour: u32 = time.split(':').next()?.trim().parse().ok()?;
    if hour == 0 || hour > 12 {
        return None;
    }
    match meridiem.trim().to_ascii_uppercase().as_str() {
        "AM" => Some(if hour == 12 { 0 } else { hour }),
        "PM" => Some(if hour == 12 { 12 } else { hour + 12 }),
        _ => None,
    }
}

/// Filter slot labels for a chosen date.
///
/// For a date other than today the labels pass through unchanged. For today,
/// slots starting before `now_hour + 2` are dropped; labels that fail to
/// parse are dropped too (a slot we cannot vet is not offered).
#[must_use]
pub fn filter_slots(
    slots: Vec<String>,
    selected: NaiveDate,
    today: NaiveDate,
    now_hour: u32,
) -> Vec<String> {
    if selected != today {
        return slots;
    }
    let cutoff = now_hour + SAME_DAY_LEAD_HOURS;
    slots
        .into_iter()
        .filter(|label| match slot_start_hour(label) {
            Some(start) => start >= cutoff,
            None => {
                tracing::warn!(label, "Unparseable slot label, dropping");
                false
            }
        })
        .collect()
}

/// Delivery scheduling against the backend, with the local fallback rule.
pub struct DeliveryService<'a> {
    api: &'a ApiClient,
    days_cache: &'a moka::future::Cache<String, Vec<u8>>,
    slots_cache: &'a moka::future::Cache<String, Vec<String>>,
}

impl<'a> DeliveryService<'a> {
    pub(crate) const fn new(
        api: &'a ApiClient,
        days_cache: &'a moka::future::Cache<String, Vec<u8>>,
        slots_cache: &'a moka::future::Cache<String, Vec<String>>,
    ) -> Self {
        Self {
            api,
            days_cache,
            slots_cache,
        }
    }

    /// Active weekdays from the backend, cached; falls back to
    /// [`FALLBACK_WEEKDAYS`] when the fetch fails.
    #[instrument(skip(self))]
    pub async fn active_weekdays(&self) -> Vec<Weekday> {
        if let Some(numbers) = self.days_cache.get("delivery-days").await {
            return weekdays_from_numbers(&numbers);
        }

        match self.api.delivery_days().await {
            Ok(response) => {
                self.days_cache
                    .insert("delivery-days".to_string(), response.active_days.clone())
                    .await;
                weekdays_from_numbers(&response.active_days)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Falling back to default delivery schedule");
                FALLBACK_WEEKDAYS.to_vec()
            }
        }
    }

    /// The next selectable delivery days from today.
    pub async fn upcoming_days(&self) -> Vec<DeliveryDay> {
        let active = self.active_weekdays().await;
        delivery_days(Utc::now().date_naive(), &active)
    }

    /// Slot labels for a chosen day, lead-time filtered when it is today.
    ///
    /// The raw labels are cached per date; the lead-time filter runs after
    /// the cache read since the cutoff moves with the clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the slot fetch fails; there is no local fallback
    /// for slots.
    #[instrument(skip(self))]
    pub async fn slots_for(&self, day: &DeliveryDay) -> Result<Vec<String>> {
        let slots = match self.slots_cache.get(&day.iso_date).await {
            Some(slots) => slots,
            None => {
                let response = self.api.delivery_slots(&day.iso_date).await?;
                self.slots_cache
                    .insert(day.iso_date.clone(), response.slots.clone())
                    .await;
                response.slots
            }
        };
        let now = Utc::now();
        Ok(filter_slots(slots, day.date, now.date_naive(), now.time().hour()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_next_dates_excludes_today() {
        // 2026-08-31 is a Monday
        let today = date(2026, 8, 31);
        let dates = next_delivery_dates(today, &[Weekday::Mon, Weekday::Thu]);
        assert!(!dates.contains(&today));
        assert_eq!(dates.first().copied(), Some(date(2026, 9, 3))); // Thursday
    }

    #[test]
    fn test_next_dates_weekday_membership_and_order() {
        let today = date(2026, 9, 1); // Tuesday
        let active = [Weekday::Mon, Weekday::Wed];
        let dates = next_delivery_dates(today, &active);
        assert_eq!(dates.len(), MAX_DELIVERY_DATES);
        assert!(dates.iter().all(|d| active.contains(&d.weekday())));
        assert!(dates.windows(2).all(|w| w[0] < w[1]));
        // Tuesday -> first eligible is the next Wednesday
        assert_eq!(dates.first().copied(), Some(date(2026, 9, 2)));
    }

    #[test]
    fn test_next_dates_empty_active_set() {
        assert!(next_delivery_dates(date(2026, 9, 1), &[]).is_empty());
    }

    #[test]
    fn test_next_dates_sparse_schedule_hits_horizon() {
        // One weekday active: only 4 occurrences fit in 30 days anyway,
        // but verify the horizon bound with a cap raised implicitly
        let today = date(2026, 9, 1);
        let dates = next_delivery_dates(today, &[Weekday::Sun]);
        assert_eq!(dates.len(), 4);
        assert!(dates.iter().all(|d| (*d - today).num_days() <= SCAN_HORIZON_DAYS));
    }

    #[test]
    fn test_delivery_days_marks_closest() {
        let days = delivery_days(date(2026, 8, 31), &[Weekday::Thu]);
        assert!(days.first().unwrap().is_closest);
        assert!(days.iter().skip(1).all(|d| !d.is_closest));
        assert_eq!(days.first().unwrap().iso_date, "2026-09-03");
    }

    #[test]
    fn test_slot_start_hour_parsing() {
        assert_eq!(slot_start_hour("9:00 AM - 1:00 PM"), Some(9));
        assert_eq!(slot_start_hour("1:00 PM - 5:00 PM"), Some(13));
        assert_eq!(slot_start_hour("12:00 PM - 4:00 PM"), Some(12));
        assert_eq!(slot_start_hour("12:30 AM - 2:00 AM"), Some(0));
        assert_eq!(slot_start_hour("whenever"), None);
        assert_eq!(slot_start_hour("13:00 PM - 14:00 PM"), None);
    }

    #[test]
    fn test_filter_slots_passthrough_for_future_date() {
        let slots = vec!["9:00 AM - 1:00 PM".to_string(), "junk".to_string()];
        let out = filter_slots(
            slots.clone(),
            date(2026, 9, 3),
            date(2026, 9, 1),
            23,
        );
        assert_eq!(out, slots);
    }

    #[test]
    fn test_filter_slots_same_day_lead_time() {
        let slots = vec![
            "9:00 AM - 1:00 PM".to_string(),
            "1:00 PM - 5:00 PM".to_string(),
            "5:00 PM - 9:00 PM".to_string(),
        ];
        let today = date(2026, 9, 1);
        // At 11:00, the 9 AM slot is gone and 1 PM (13 >= 13) survives
        let out = filter_slots(slots, today, today, 11);
        assert_eq!(
            out,
            vec!["1:00 PM - 5:00 PM".to_string(), "5:00 PM - 9:00 PM".to_string()]
        );
    }

    #[test]
    fn test_filter_slots_same_day_drops_unparseable() {
        let today = date(2026, 9, 1);
        let out = filter_slots(vec!["junk".to_string()], today, today, 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_weekdays_from_numbers_skips_invalid() {
        assert_eq!(
            weekdays_from_numbers(&[1, 4, 9, 0]),
            vec![Weekday::Mon, Weekday::Thu]
        );
    }

    #[test]
    fn test_label_format() {
        let day = DeliveryDay::from_date(date(2026, 9, 3), true);
        assert_eq!(day.label, "Thu, Sep 3");
    }

    #[tokio::test]
    async fn test_slots_served_from_cache_without_fetch() {
        use crate::config::ClientConfig;

        // Unroutable backend: a fetch attempt would error, so an Ok result
        // proves the cached labels were used
        let config = ClientConfig {
            api_base_url: "http://127.0.0.1:1".to_string(),
            api_token: None,
            maps_api_key: secrecy::SecretString::from("test-key"),
            timeout: std::time::Duration::from_millis(200),
            cache_ttl: std::time::Duration::from_secs(300),
        };
        let api = ApiClient::new(&config).unwrap();
        let days_cache = moka::future::Cache::new(4);
        let slots_cache = moka::future::Cache::new(8);

        let day = DeliveryDay::from_date(
            Utc::now().date_naive() + chrono::Days::new(5),
            true,
        );
        slots_cache
            .insert(day.iso_date.clone(), vec!["9:00 AM - 1:00 PM".to_string()])
            .await;

        let service = DeliveryService::new(&api, &days_cache, &slots_cache);
        let slots = service.slots_for(&day).await.unwrap();
        // Not today, so the cached labels pass through unfiltered
        assert_eq!(slots, vec!["9:00 AM - 1:00 PM".to_string()]);
    }
}
