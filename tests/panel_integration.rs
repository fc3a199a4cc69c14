// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the panel client using wiremock.

use std::time::Duration;

use serde_json::json;
use spanr_lib::{Error, PanelClient, Priority, RelayState, TransportError};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const NEW_FIRMWARE: &str = "spanos2/r202249/02";
const OLD_FIRMWARE: &str = "spanos2/r202216/07";

fn status_body(serial: &str, firmware: &str) -> serde_json::Value {
    json!({
        "system": {"serial": serial, "model": "00200", "doorState": "OPEN"},
        "software": {"firmwareVersion": firmware},
        "network": {"eth0Link": true, "wlanLink": false, "wwanLink": false}
    })
}

fn circuits_body() -> serde_json::Value {
    json!({
        "circuits": {
            "id1": {
                "name": "Kitchen",
                "instantPowerW": -120.5,
                "producedEnergyWh": 0,
                "consumedEnergyWh": 500,
                "relayState": "CLOSED",
                "priority": "MUST_HAVE",
                "tabs": [3],
                "is_user_controllable": true
            },
            "id2": {
                "name": "Hot Tub",
                "instantPowerW": 0.0,
                "producedEnergyWh": 0,
                "consumedEnergyWh": 9000,
                "relayState": "OPEN",
                "priority": "NOT_ESSENTIAL",
                "tabs": [11, 13],
                "is_user_controllable": false
            }
        }
    })
}

async fn mount_status(server: &MockServer, firmware: &str) {
    Mock::given(method("GET"))
        .and(path("/api/v1/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(status_body("SN123", firmware)))
        .mount(server)
        .await;
}

async fn mount_circuits(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/v1/circuits"))
        .respond_with(ResponseTemplate::new(200).set_body_json(circuits_body()))
        .mount(server)
        .await;
}

async fn mount_panel_power(server: &MockServer, watts: f64) {
    Mock::given(method("GET"))
        .and(path("/api/v1/panel"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"instantGridPowerW": watts})),
        )
        .mount(server)
        .await;
}

// ============================================================================
// Status refresh
// ============================================================================

mod status {
    use super::*;

    #[tokio::test]
    async fn refresh_status_populates_snapshot() {
        let server = MockServer::start().await;
        mount_status(&server, NEW_FIRMWARE).await;

        let client = PanelClient::new(server.uri()).unwrap();
        client.refresh_status().await.unwrap();

        assert_eq!(client.serial_number().unwrap(), "SN123");
        assert_eq!(client.firmware_version().unwrap(), NEW_FIRMWARE);
        assert_eq!(client.model().unwrap(), "00200");
        assert!(client.is_door_open().unwrap());
        assert!(!client.is_door_closed().unwrap());
        assert!(client.is_ethernet_connected().unwrap());
        assert!(!client.is_wifi_connected().unwrap());
        assert!(!client.is_cellular_connected().unwrap());
    }

    #[tokio::test]
    async fn serial_number_is_never_overwritten() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/status"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(status_body("SN123", NEW_FIRMWARE)),
            )
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/status"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(status_body("SN999", "spanos2/r202250/01")),
            )
            .mount(&server)
            .await;

        let client = PanelClient::new(server.uri()).unwrap();
        client.refresh_status().await.unwrap();
        assert_eq!(client.serial_number().unwrap(), "SN123");

        client.refresh_status().await.unwrap();
        // identity stays, everything else tracks the latest payload
        assert_eq!(client.serial_number().unwrap(), "SN123");
        assert_eq!(client.firmware_version().unwrap(), "spanos2/r202250/01");
    }

    #[tokio::test]
    async fn unauthorized_status_is_an_authorization_rejection() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/status"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = PanelClient::new(server.uri()).unwrap();
        let err = client.refresh_status().await.unwrap_err();
        match err {
            Error::Rejected(rejected) => {
                assert_eq!(rejected.status, 401);
                assert!(rejected.is_authorization());
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }
}

// ============================================================================
// Circuits refresh and endpoint selection
// ============================================================================

mod circuits {
    use super::*;

    #[tokio::test]
    async fn refresh_circuits_populates_registry() {
        let server = MockServer::start().await;
        mount_status(&server, NEW_FIRMWARE).await;
        mount_circuits(&server).await;

        let client = PanelClient::new(server.uri()).unwrap();
        client.refresh_circuits().await.unwrap();

        let registry = client.circuits().unwrap();
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.name("id1").unwrap(), "Kitchen");
        // magnitude: producing circuits read as non-negative power
        assert!((registry.power("id1").unwrap() - 120.5).abs() < f64::EPSILON);
        assert!(!registry.is_relay_open("id1").unwrap());
        assert!(registry.is_relay_closed("id1").unwrap());
        assert_eq!(registry.priority("id2").unwrap(), Priority::NotEssential);
        assert_eq!(registry.breaker_positions("id2").unwrap(), &[11, 13]);
    }

    #[tokio::test]
    async fn old_firmware_uses_spaces_endpoint() {
        let server = MockServer::start().await;
        mount_status(&server, OLD_FIRMWARE).await;
        Mock::given(method("GET"))
            .and(path("/api/v1/spaces"))
            .respond_with(ResponseTemplate::new(200).set_body_json(circuits_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = PanelClient::new(server.uri()).unwrap();
        client.refresh_circuits().await.unwrap();
        assert_eq!(client.circuits().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn new_firmware_uses_circuits_endpoint() {
        let server = MockServer::start().await;
        mount_status(&server, NEW_FIRMWARE).await;
        Mock::given(method("GET"))
            .and(path("/api/v1/circuits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(circuits_body()))
            .expect(1)
            .mount(&server)
            .await;

        let client = PanelClient::new(server.uri()).unwrap();
        client.refresh_circuits().await.unwrap();
        assert_eq!(client.circuits().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn refresh_is_idempotent_for_unchanged_payload() {
        let server = MockServer::start().await;
        mount_status(&server, NEW_FIRMWARE).await;
        mount_circuits(&server).await;

        let client = PanelClient::new(server.uri()).unwrap();
        client.refresh_circuits().await.unwrap();
        let first = client.circuits().unwrap();
        client.refresh_circuits().await.unwrap();
        let second = client.circuits().unwrap();

        assert_eq!(first, second);
    }
}

// ============================================================================
// Full refresh
// ============================================================================

mod refresh_all {
    use super::*;

    #[tokio::test]
    async fn refresh_all_populates_every_region() {
        let server = MockServer::start().await;
        mount_status(&server, NEW_FIRMWARE).await;
        mount_circuits(&server).await;
        mount_panel_power(&server, 1523.4).await;

        let client = PanelClient::new(server.uri()).unwrap();
        client.refresh_all().await.unwrap();

        assert_eq!(client.serial_number().unwrap(), "SN123");
        assert!((client.instant_grid_power().unwrap() - 1523.4).abs() < f64::EPSILON);
        assert_eq!(client.circuits().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn failed_region_keeps_last_value_while_others_commit() {
        let server = MockServer::start().await;
        mount_status(&server, NEW_FIRMWARE).await;
        mount_circuits(&server).await;
        Mock::given(method("GET"))
            .and(path("/api/v1/panel"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let client = PanelClient::new(server.uri()).unwrap();
        let err = client.refresh_all().await.unwrap_err();
        assert!(matches!(err, Error::Rejected(r) if r.status == 500));

        // the failing region never loaded, the healthy ones did
        assert!(matches!(
            client.instant_grid_power(),
            Err(Error::NotYetLoaded(_))
        ));
        assert_eq!(client.serial_number().unwrap(), "SN123");
        assert_eq!(client.circuits().unwrap().len(), 2);
    }
}

// ============================================================================
// Transport retry
// ============================================================================

mod retry {
    use super::*;

    #[tokio::test]
    async fn transient_failures_are_retried_up_to_three_attempts() {
        let server = MockServer::start().await;
        // first two attempts exceed the client timeout, third answers
        Mock::given(method("GET"))
            .and(path("/api/v1/status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(status_body("SN123", NEW_FIRMWARE))
                    .set_delay(Duration::from_millis(500)),
            )
            .up_to_n_times(2)
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/v1/status"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(status_body("SN123", NEW_FIRMWARE)),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = PanelClient::builder(server.uri())
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();

        client.refresh_status().await.unwrap();
        assert_eq!(client.serial_number().unwrap(), "SN123");
    }

    #[tokio::test]
    async fn dead_link_fails_after_three_attempts() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/status"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(status_body("SN123", NEW_FIRMWARE))
                    .set_delay(Duration::from_millis(500)),
            )
            .expect(3)
            .mount(&server)
            .await;

        let client = PanelClient::builder(server.uri())
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();

        let err = client.refresh_status().await.unwrap_err();
        match err {
            Error::Transport(TransportError::RetriesExhausted { attempts, .. }) => {
                assert_eq!(attempts, 3);
            }
            other => panic!("expected exhausted retries, got {other:?}"),
        }
        // cache untouched
        assert!(matches!(client.serial_number(), Err(Error::NotYetLoaded(_))));
    }

    #[tokio::test]
    async fn http_error_status_is_not_retried() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/status"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let client = PanelClient::new(server.uri()).unwrap();
        let err = client.refresh_status().await.unwrap_err();
        assert!(matches!(err, Error::Rejected(_)));
    }
}

// ============================================================================
// Mutations
// ============================================================================

mod mutation {
    use super::*;

    #[tokio::test]
    async fn set_relay_posts_to_circuit_path() {
        let server = MockServer::start().await;
        mount_status(&server, NEW_FIRMWARE).await;
        Mock::given(method("POST"))
            .and(path("/api/v1/circuits/id1"))
            .and(body_json(json!({"relay_state_in": {"relayState": "CLOSED"}})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = PanelClient::new(server.uri()).unwrap();
        client.set_relay_closed("id1").await.unwrap();
    }

    #[tokio::test]
    async fn set_relay_uses_spaces_path_on_old_firmware() {
        let server = MockServer::start().await;
        mount_status(&server, OLD_FIRMWARE).await;
        Mock::given(method("POST"))
            .and(path("/api/v1/spaces/id1"))
            .and(body_json(json!({"relay_state_in": {"relayState": "OPEN"}})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = PanelClient::new(server.uri()).unwrap();
        client.set_relay_open("id1").await.unwrap();
    }

    #[tokio::test]
    async fn set_priority_posts_priority_body() {
        let server = MockServer::start().await;
        mount_status(&server, NEW_FIRMWARE).await;
        Mock::given(method("POST"))
            .and(path("/api/v1/circuits/id1"))
            .and(body_json(json!({"priority_in": {"priority": "NOT_ESSENTIAL"}})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = PanelClient::new(server.uri()).unwrap();
        client
            .set_priority("id1", Priority::NotEssential)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn rejected_mutation_leaves_cache_unchanged() {
        let server = MockServer::start().await;
        mount_status(&server, NEW_FIRMWARE).await;
        mount_circuits(&server).await;
        // id2 is not user controllable; the panel refuses with 400
        Mock::given(method("POST"))
            .and(path("/api/v1/circuits/id2"))
            .respond_with(ResponseTemplate::new(400))
            .expect(1)
            .mount(&server)
            .await;

        let client = PanelClient::new(server.uri()).unwrap();
        client.refresh_circuits().await.unwrap();
        let before = client.circuits().unwrap();

        let err = client
            .set_priority("id2", Priority::NotEssential)
            .await
            .unwrap_err();
        match err {
            Error::Rejected(rejected) => {
                assert_eq!(rejected.status, 400);
                assert!(!rejected.is_authorization());
            }
            other => panic!("expected rejection, got {other:?}"),
        }

        // no optimistic update: the cached state is exactly as before
        assert_eq!(client.circuits().unwrap(), before);
    }

    #[tokio::test]
    async fn mutation_resolves_endpoint_without_prior_refresh() {
        // no refresh has happened, so the mutation triggers its own status
        // fetch to resolve the endpoint family
        let server = MockServer::start().await;
        mount_status(&server, NEW_FIRMWARE).await;
        Mock::given(method("POST"))
            .and(path("/api/v1/circuits/id1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let client = PanelClient::new(server.uri()).unwrap();
        client.set_relay("id1", RelayState::Open).await.unwrap();
        // the status fetched for resolution was committed on the way
        assert_eq!(client.serial_number().unwrap(), "SN123");
    }
}
