//! Newsletter subscribers and sending.
//!
//! Sending only records the newsletter; nothing leaves the process.

use crate::search::SortDirection;
use crate::{HerbalError, HerbalResult};
use chrono::NaiveDate;
use herbal_types::{EmailAddress, NonEmptyText};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Subscriber {
    pub id: String,
    pub email: String,
    pub name: Option<String>,
    pub subscribed: bool,
    pub joined_at: NaiveDate,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NewsletterStatus {
    Sent,
    Draft,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SentNewsletter {
    pub id: String,
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    pub sent_at: Option<NaiveDate>,
    pub status: NewsletterStatus,
    pub open_rate: Option<u8>,
    pub recipients: Option<u32>,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SubscriberSort {
    #[default]
    JoinedAt,
    Email,
    Name,
}

#[derive(Clone, Debug)]
pub struct Newsletter {
    subscribers: Vec<Subscriber>,
    newsletters: Vec<SentNewsletter>,
}

impl Default for Newsletter {
    fn default() -> Self {
        Self::seeded()
    }
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

impl Newsletter {
    /// Ten demo subscribers and four past newsletters.
    pub fn seeded() -> Self {
        let seed: [(Option<&str>, bool, NaiveDate); 10] = [
            (Some("John Doe"), true, date(2023, 1, 15)),
            (Some("Jane Smith"), true, date(2023, 2, 22)),
            (Some("Robert Johnson"), false, date(2023, 3, 10)),
            (Some("Emma Wilson"), true, date(2023, 4, 5)),
            (Some("Michael Brown"), true, date(2023, 5, 17)),
            (None, true, date(2023, 6, 20)),
            (Some("Sarah Davis"), true, date(2023, 7, 11)),
            (Some("David Miller"), false, date(2023, 8, 30)),
            (None, true, date(2023, 9, 14)),
            (Some("Lisa Taylor"), true, date(2023, 10, 7)),
        ];
        let subscribers = seed
            .into_iter()
            .enumerate()
            .map(|(i, (name, subscribed, joined_at))| Subscriber {
                id: (i + 1).to_string(),
                email: format!("user{}@example.com", i + 1),
                name: name.map(str::to_string),
                subscribed,
                joined_at,
            })
            .collect();

        let sent = |id: &str, subject: &str, sent_at, open_rate, recipients| SentNewsletter {
            id: id.to_string(),
            subject: subject.to_string(),
            content: None,
            sent_at: Some(sent_at),
            status: NewsletterStatus::Sent,
            open_rate: Some(open_rate),
            recipients: Some(recipients),
        };
        let newsletters = vec![
            sent("1", "Tips Kesehatan Herbal Mingguan", date(2023, 10, 1), 68, 120),
            sent("2", "5 Herbal untuk Meningkatkan Imunitas", date(2023, 9, 15), 72, 115),
            sent("3", "Diskon 20% untuk Semua Produk Herbal", date(2023, 9, 1), 85, 110),
            SentNewsletter {
                id: "4".to_string(),
                subject: "Produk Baru: Teh Herbal Premium".to_string(),
                content: None,
                sent_at: None,
                status: NewsletterStatus::Draft,
                open_rate: None,
                recipients: None,
            },
        ];

        Self {
            subscribers,
            newsletters,
        }
    }

    pub fn newsletters(&self) -> &[SentNewsletter] {
        &self.newsletters
    }

    pub fn active_count(&self) -> usize {
        self.subscribers.iter().filter(|s| s.subscribed).count()
    }

    /// Subscribe `email`. A previously unsubscribed address is re-activated.
    ///
    /// # Errors
    ///
    /// Returns [`HerbalError::InvalidInput`] for a malformed email and
    /// [`HerbalError::AlreadySubscribed`] if the address is already active.
    pub fn subscribe(
        &mut self,
        email: &str,
        name: Option<&str>,
        today: NaiveDate,
    ) -> HerbalResult<Subscriber> {
        let email = EmailAddress::parse(email)?;
        let name = name
            .and_then(|n| NonEmptyText::new(n).ok())
            .map(|n| n.to_string());

        if let Some(existing) = self
            .subscribers
            .iter_mut()
            .find(|s| s.email.eq_ignore_ascii_case(email.as_str()))
        {
            if existing.subscribed {
                return Err(HerbalError::AlreadySubscribed);
            }
            existing.subscribed = true;
            if name.is_some() {
                existing.name = name;
            }
            return Ok(existing.clone());
        }

        let subscriber = Subscriber {
            id: self.next_subscriber_id(),
            email: email.to_string(),
            name,
            subscribed: true,
            joined_at: today,
        };
        tracing::info!(id = %subscriber.id, "newsletter subscription added");
        self.subscribers.push(subscriber.clone());
        Ok(subscriber)
    }

    fn next_subscriber_id(&self) -> String {
        let max = self
            .subscribers
            .iter()
            .filter_map(|s| s.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        (max + 1).to_string()
    }

    /// Set the active flag of a subscriber. Returns `None` for an unknown id.
    pub fn set_subscribed(&mut self, id: &str, subscribed: bool) -> Option<&Subscriber> {
        let subscriber = self.subscribers.iter_mut().find(|s| s.id == id)?;
        subscriber.subscribed = subscribed;
        Some(subscriber)
    }

    /// Subscribers ordered by `field`. Missing names sort last in both directions.
    pub fn subscribers_sorted(
        &self,
        field: SubscriberSort,
        direction: SortDirection,
    ) -> Vec<&Subscriber> {
        let directed = |ordering: Ordering| match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        };

        let mut sorted: Vec<&Subscriber> = self.subscribers.iter().collect();
        sorted.sort_by(|a, b| match field {
            SubscriberSort::JoinedAt => directed(a.joined_at.cmp(&b.joined_at)),
            SubscriberSort::Email => directed(a.email.to_lowercase().cmp(&b.email.to_lowercase())),
            SubscriberSort::Name => match (&a.name, &b.name) {
                (Some(x), Some(y)) => directed(x.to_lowercase().cmp(&y.to_lowercase())),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
        });
        sorted
    }

    /// Record a newsletter sent to the selected active subscribers.
    ///
    /// `recipient_ids` of `None` selects every active subscriber. Inactive or unknown ids are
    /// ignored.
    ///
    /// # Errors
    ///
    /// * [`HerbalError::MissingFields`] if the subject or content is blank.
    /// * [`HerbalError::NoRecipients`] if no active subscriber is selected.
    pub fn send(
        &mut self,
        subject: &str,
        content: &str,
        recipient_ids: Option<&[String]>,
        today: NaiveDate,
    ) -> HerbalResult<SentNewsletter> {
        let mut missing = Vec::new();
        if subject.trim().is_empty() {
            missing.push("subject");
        }
        if content.trim().is_empty() {
            missing.push("content");
        }
        if !missing.is_empty() {
            return Err(HerbalError::MissingFields(missing));
        }

        let recipients = self
            .subscribers
            .iter()
            .filter(|s| s.subscribed)
            .filter(|s| recipient_ids.map_or(true, |ids| ids.contains(&s.id)))
            .count();
        if recipients == 0 {
            return Err(HerbalError::NoRecipients);
        }

        let newsletter = SentNewsletter {
            id: (self.newsletters.len() + 1).to_string(),
            subject: subject.trim().to_string(),
            content: Some(content.to_string()),
            sent_at: Some(today),
            status: NewsletterStatus::Sent,
            open_rate: None,
            recipients: Some(recipients as u32),
        };
        tracing::info!(
            id = %newsletter.id,
            recipients,
            active = self.active_count(),
            "newsletter sent"
        );
        self.newsletters.push(newsletter.clone());
        Ok(newsletter)
    }
}
