#![allow(dead_code)]

use async_trait::async_trait;
use launch_board::fetch::{FetchError, LaunchSource};
use launch_board::model::{Launch, LaunchLinks, Launchpad, Patch, Payload, Rocket};
use reqwest::StatusCode;
use serde_json::json;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Mutex;

/// In-memory source that records every request and can fail chosen
/// collections with a 503.
#[derive(Clone, Default)]
pub struct RecordingSource {
    pub launches: Vec<Launch>,
    pub rockets: Vec<Rocket>,
    pub launchpads: Vec<Launchpad>,
    pub payloads: Vec<Payload>,
    failing: HashSet<&'static str>,
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingSource {
    pub fn fixture() -> Self {
        Self {
            launches: fixture_launches(),
            rockets: vec![
                Rocket { id: "falcon1".into(), name: "Falcon 1".into() },
                Rocket { id: "falcon9".into(), name: "Falcon 9".into() },
            ],
            launchpads: vec![
                Launchpad { id: "kwaj".into(), name: "Kwajalein Atoll".into() },
                Launchpad { id: "ksc".into(), name: "KSC LC 39A".into() },
            ],
            payloads: vec![
                Payload {
                    id: "pl-crew".into(),
                    kind: Some("Crew Dragon".into()),
                    customers: vec!["NASA (CCP)".into()],
                },
                Payload {
                    id: "pl-sat".into(),
                    kind: Some("Satellite".into()),
                    customers: vec!["Orbcomm".into()],
                },
            ],
            ..Default::default()
        }
    }

    pub fn failing(mut self, what: &'static str) -> Self {
        self.failing.insert(what);
        self
    }

    pub async fn calls(&self) -> Vec<String> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, what: &str) -> Result<(), FetchError> {
        self.calls.lock().await.push(what.to_string());
        let key = what.split('/').next().unwrap_or(what);
        if self.failing.contains(key) {
            return Err(FetchError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                body: "maintenance".into(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl LaunchSource for RecordingSource {
    async fn launches(&self) -> Result<Vec<Launch>, FetchError> {
        self.record("launches").await?;
        Ok(self.launches.clone())
    }

    async fn launch(&self, id: &str) -> Result<Option<Launch>, FetchError> {
        self.record(&format!("launch/{}", id)).await?;
        Ok(self.launches.iter().find(|l| l.id == id).cloned())
    }

    async fn rockets(&self) -> Result<Vec<Rocket>, FetchError> {
        self.record("rockets").await?;
        Ok(self.rockets.clone())
    }

    async fn launchpads(&self) -> Result<Vec<Launchpad>, FetchError> {
        self.record("launchpads").await?;
        Ok(self.launchpads.clone())
    }

    async fn payloads(&self) -> Result<Vec<Payload>, FetchError> {
        self.record("payloads").await?;
        Ok(self.payloads.clone())
    }
}

/// Four launches shaped like the public API's payloads.
pub fn fixture_launches() -> Vec<Launch> {
    let raw = json!([
        {
            "id": "falconsat",
            "name": "FalconSat",
            "date_utc": "2006-03-24T22:30:00.000Z",
            "success": false,
            "details": "Engine failure at 33 seconds and loss of vehicle",
            "rocket": "falcon1",
            "launchpad": "kwaj",
            "payloads": [],
            "flight_number": 1,
            "upcoming": false,
            "cores": [{ "reused": false }]
        },
        {
            "id": "crew1",
            "name": "Crew-1",
            "date_utc": "2020-11-16T00:27:00.000Z",
            "success": true,
            "details": "SpaceX launches the first operational Crew Dragon mission to the International Space Station, carrying four astronauts for a six month stay aboard the orbiting laboratory after a successful certification campaign.",
            "rocket": "falcon9",
            "launchpad": "ksc",
            "payloads": ["pl-crew"],
            "flight_number": 107,
            "upcoming": false,
            "cores": [{ "reused": true }],
            "links": { "webcast": "https://youtu.be/bnChQbxLkkI" }
        },
        {
            "id": "orbcomm",
            "name": "ORBCOMM OG2",
            "date_utc": "2015-12-22T01:29:00.000Z",
            "success": true,
            "details": null,
            "rocket": "falcon9",
            "launchpad": "ccafs",
            "payloads": ["pl-sat"],
            "flight_number": 25
        },
        {
            "id": "future",
            "name": "Polaris Dawn II",
            "date_utc": "2027-01-01T00:00:00.000Z",
            "success": null,
            "details": null,
            "rocket": "falcon9",
            "launchpad": "ksc",
            "upcoming": true
        }
    ]);
    serde_json::from_value(raw).expect("fixture launches")
}

pub fn with_patch(mut launch: Launch, small: &str) -> Launch {
    launch.links = Some(LaunchLinks {
        patch: Some(Patch {
            small: Some(small.to_string()),
            large: None,
        }),
        ..launch.links.unwrap_or_default()
    });
    launch
}
