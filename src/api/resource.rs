//! CRUD endpoint groups
//!
//! `/tasks` and `/appointments` expose the same five operations, so both
//! are served by one [`ResourceApi`] parameterized by a [`Resource`]
//! marker.

use std::marker::PhantomData;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use super::{ApiClient, Credential};
use crate::error::Result;
use crate::models::{Appointment, AppointmentDraft, Task, TaskDraft};

/// A REST collection on the Taskify API
pub trait Resource {
    /// Collection path relative to the base URL
    const PATH: &'static str;
    /// Entity returned by the server
    type Entity: DeserializeOwned + Send;
    /// Body of create and update requests
    type Draft: Serialize + Sync;
}

/// The `/tasks` collection
#[derive(Debug, Clone, Copy)]
pub struct Tasks;

impl Resource for Tasks {
    const PATH: &'static str = "tasks";
    type Entity = Task;
    type Draft = TaskDraft;
}

/// The `/appointments` collection
#[derive(Debug, Clone, Copy)]
pub struct Appointments;

impl Resource for Appointments {
    const PATH: &'static str = "appointments";
    type Entity = Appointment;
    type Draft = AppointmentDraft;
}

/// Endpoint group for one [`Resource`]
///
/// Obtained from [`ApiClient::tasks`] or [`ApiClient::appointments`]. All
/// calls carry the session token when one is stored.
#[derive(Debug)]
pub struct ResourceApi<'a, R> {
    client: &'a ApiClient,
    _resource: PhantomData<R>,
}

impl<'a, R: Resource> ResourceApi<'a, R> {
    pub(crate) fn new(client: &'a ApiClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    fn item_path(id: i64) -> String {
        format!("{}/{}", R::PATH, id)
    }

    /// `GET /{collection}`
    pub async fn get_all(&self) -> Result<Vec<R::Entity>> {
        let req = self
            .client
            .request(Method::GET, R::PATH, Credential::Session)?;
        self.client.execute_json(req).await
    }

    /// `GET /{collection}/{id}`
    pub async fn get_by_id(&self, id: i64) -> Result<R::Entity> {
        let req = self
            .client
            .request(Method::GET, &Self::item_path(id), Credential::Session)?;
        self.client.execute_json(req).await
    }

    /// `POST /{collection}`, returning the created entity
    pub async fn create(&self, draft: &R::Draft) -> Result<R::Entity> {
        let req = self
            .client
            .request(Method::POST, R::PATH, Credential::Session)?
            .json(draft);
        self.client.execute_json(req).await
    }

    /// `PUT /{collection}/{id}`, returning the updated entity
    pub async fn update(&self, id: i64, draft: &R::Draft) -> Result<R::Entity> {
        let req = self
            .client
            .request(Method::PUT, &Self::item_path(id), Credential::Session)?
            .json(draft);
        self.client.execute_json(req).await
    }

    /// `DELETE /{collection}/{id}`
    pub async fn delete(&self, id: i64) -> Result<()> {
        let req = self
            .client
            .request(Method::DELETE, &Self::item_path(id), Credential::Session)?;
        self.client.execute_empty(req).await
    }
}
