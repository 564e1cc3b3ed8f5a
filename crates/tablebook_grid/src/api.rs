// --- File: crates/tablebook_grid/src/api.rs ---
//! Client side of the booking backend.
//!
//! ```text
//! GET    /bookings/?date=YYYY-MM-DD  -> [Booking]
//! POST   /bookings/                  -> Booking
//! PUT    /bookings/{id}              -> Booking
//! DELETE /bookings/{id}              -> 2xx
//! ```
//!
//! Failures carry `{"detail": ...}`, surfaced verbatim as [`GridError::Api`].

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tablebook_common::{client_for, error_detail};
use tablebook_config::ApiConfig;
use tracing::debug;

use crate::error::GridError;
use crate::models::{Booking, BookingDraft};

/// The four backend operations the grid relies on.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, GridError>;
    async fn create(&self, draft: &BookingDraft) -> Result<Booking, GridError>;
    async fn update(&self, id: i64, draft: &BookingDraft) -> Result<Booking, GridError>;
    async fn delete(&self, id: i64) -> Result<(), GridError>;
}

#[async_trait]
impl<T: BookingApi + ?Sized> BookingApi for std::sync::Arc<T> {
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, GridError> {
        (**self).list_by_date(date).await
    }

    async fn create(&self, draft: &BookingDraft) -> Result<Booking, GridError> {
        (**self).create(draft).await
    }

    async fn update(&self, id: i64, draft: &BookingDraft) -> Result<Booking, GridError> {
        (**self).update(id, draft).await
    }

    async fn delete(&self, id: i64) -> Result<(), GridError> {
        (**self).delete(id).await
    }
}

/// [`BookingApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpBookingApi {
    client: Client,
    base_url: String,
}

impl HttpBookingApi {
    pub fn new(base_url: &str, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, GridError> {
        let client = client_for(config)?;
        Ok(Self::new(&config.base_url, client))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    async fn check_status(response: Response) -> Result<Response, GridError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let detail = error_detail(&body);
        // reported by the caller
        debug!("Booking service returned {}: {}", status, detail);
        Err(GridError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, GridError> {
        let response = Self::check_status(response).await?;
        Ok(response.json().await?)
    }
}

#[async_trait]
impl BookingApi for HttpBookingApi {
    async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, GridError> {
        let date = date.format("%Y-%m-%d").to_string();
        debug!("GET bookings for {}", date);
        let response = self
            .client
            .get(self.url("bookings/"))
            .query(&[("date", date.as_str())])
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn create(&self, draft: &BookingDraft) -> Result<Booking, GridError> {
        debug!(
            "POST booking table={} slots={}..{}",
            draft.table, draft.start, draft.end
        );
        let response = self
            .client
            .post(self.url("bookings/"))
            .json(draft)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn update(&self, id: i64, draft: &BookingDraft) -> Result<Booking, GridError> {
        debug!("PUT booking {}", id);
        let response = self
            .client
            .put(self.url(&format!("bookings/{id}")))
            .json(draft)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    async fn delete(&self, id: i64) -> Result<(), GridError> {
        debug!("DELETE booking {}", id);
        let response = self
            .client
            .delete(self.url(&format!("bookings/{id}")))
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(())
    }
}

/// In-memory backend with the reference server's rules, for tests and demos.
pub mod mock {
    use super::*;
    use std::sync::{Mutex, MutexGuard, PoisonError};

    /// One recorded call, in order.
    #[derive(Debug, Clone, PartialEq)]
    pub enum ApiCall {
        ListByDate(NaiveDate),
        Create(BookingDraft),
        Update(i64, BookingDraft),
        Delete(i64),
    }

    #[derive(Default)]
    struct Store {
        next_id: i64,
        bookings: Vec<Booking>,
        calls: Vec<ApiCall>,
        fail_next: Option<GridError>,
    }

    /// Assigns ids, rejects same-table overlaps with `"Time slot conflict"` and
    /// unknown ids with `"Booking not found"`.
    #[derive(Default)]
    pub struct InMemoryBookingApi {
        store: Mutex<Store>,
    }

    impl InMemoryBookingApi {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_bookings(bookings: Vec<Booking>) -> Self {
            let next_id = bookings.iter().map(|b| b.id).max().unwrap_or(0);
            Self {
                store: Mutex::new(Store {
                    next_id,
                    bookings,
                    ..Store::default()
                }),
            }
        }

        /// Makes the next call fail with `error` without touching the data.
        pub fn fail_next(&self, error: GridError) {
            self.lock().fail_next = Some(error);
        }

        pub fn calls(&self) -> Vec<ApiCall> {
            self.lock().calls.clone()
        }

        pub fn bookings(&self) -> Vec<Booking> {
            self.lock().bookings.clone()
        }

        fn lock(&self) -> MutexGuard<'_, Store> {
            self.store.lock().unwrap_or_else(PoisonError::into_inner)
        }

        fn record(&self, call: ApiCall) -> Result<MutexGuard<'_, Store>, GridError> {
            let mut store = self.lock();
            store.calls.push(call);
            match store.fail_next.take() {
                Some(error) => Err(error),
                None => Ok(store),
            }
        }
    }

    fn conflict(bookings: &[Booking], draft: &BookingDraft, except: Option<i64>) -> bool {
        bookings.iter().any(|b| {
            Some(b.id) != except
                && b.details.table == draft.table
                && b.details.date == draft.date
                && b.details.start < draft.end
                && b.details.end > draft.start
        })
    }

    fn api_error(status: u16, detail: &str) -> GridError {
        GridError::Api {
            status,
            detail: detail.to_string(),
        }
    }

    #[async_trait]
    impl BookingApi for InMemoryBookingApi {
        async fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Booking>, GridError> {
            let store = self.record(ApiCall::ListByDate(date))?;
            Ok(store
                .bookings
                .iter()
                .filter(|b| b.date() == date)
                .cloned()
                .collect())
        }

        async fn create(&self, draft: &BookingDraft) -> Result<Booking, GridError> {
            let mut store = self.record(ApiCall::Create(draft.clone()))?;
            if conflict(&store.bookings, draft, None) {
                return Err(api_error(400, "Time slot conflict"));
            }
            store.next_id += 1;
            let booking = Booking {
                id: store.next_id,
                details: draft.clone(),
            };
            store.bookings.push(booking.clone());
            Ok(booking)
        }

        async fn update(&self, id: i64, draft: &BookingDraft) -> Result<Booking, GridError> {
            let mut store = self.record(ApiCall::Update(id, draft.clone()))?;
            if !store.bookings.iter().any(|b| b.id == id) {
                return Err(api_error(404, "Booking not found"));
            }
            if conflict(&store.bookings, draft, Some(id)) {
                return Err(api_error(400, "Time slot conflict"));
            }
            let booking = Booking {
                id,
                details: draft.clone(),
            };
            if let Some(slot) = store.bookings.iter_mut().find(|b| b.id == id) {
                *slot = booking.clone();
            }
            Ok(booking)
        }

        async fn delete(&self, id: i64) -> Result<(), GridError> {
            let mut store = self.record(ApiCall::Delete(id))?;
            let before = store.bookings.len();
            store.bookings.retain(|b| b.id != id);
            if store.bookings.len() == before {
                return Err(api_error(404, "Booking not found"));
            }
            Ok(())
        }
    }
}
