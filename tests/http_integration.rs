// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests for the CEMM HTTP API using wiremock.

use std::time::Duration;

use cemm::types::{ConnectionKind, TariffPeriod};
use cemm::{Cemm, ConnectionError, Error, HttpConfig};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

const JSON: &str = "application/json; charset=utf-8";

/// Matches the exact `Accept` value, commas included.
fn accepts_json_text_and_anything(request: &Request) -> bool {
    request
        .headers
        .get("accept")
        .and_then(|value| value.to_str().ok())
        == Some("application/json, text/plain, */*")
}

fn fixture(name: &str) -> String {
    let path = format!("{}/tests/fixtures/{name}", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(path).unwrap()
}

fn config(server: &MockServer) -> HttpConfig {
    HttpConfig::new(server.uri())
}

async fn mount_fixture(server: &MockServer, api_path: &str, name: &str) {
    Mock::given(method("GET"))
        .and(path(api_path))
        .respond_with(ResponseTemplate::new(200).set_body_raw(fixture(name), JSON))
        .mount(server)
        .await;
}

// ============================================================================
// Transport
// ============================================================================

mod transport {
    use super::*;

    #[tokio::test]
    async fn json_request() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/open-api/test"))
            .and(accepts_json_text_and_anything)
            .and(header(
                "user-agent",
                concat!("cemm-rs/", env!("CARGO_PKG_VERSION")),
            ))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "ok" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let cemm = Cemm::with_session(config(&server), reqwest::Client::new());
        let json = cemm.request("test", &[]).await.unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn internal_session() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/open-api/test"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "status": "ok" })),
            )
            .mount(&server)
            .await;

        let cemm = Cemm::new(server.uri()).unwrap();
        assert!(cemm.http_client().session().is_owned());
        cemm.request("test", &[]).await.unwrap();
        cemm.close();
    }

    #[tokio::test]
    async fn query_parameters_are_sent() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/open-api/v1/io"))
            .and(query_param("type", "p1"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{\"data\": []}", JSON))
            .expect(1)
            .mount(&server)
            .await;

        let cemm = Cemm::new(server.uri()).unwrap();
        cemm.request("v1/io", &[("type", "p1")]).await.unwrap();
    }

    #[tokio::test]
    async fn timeout_is_connection_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/open-api/v1/p1/realtime"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(fixture("smartmeter.json"), JSON)
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let cemm = Cemm::with_session(
            config(&server).with_timeout(Duration::from_millis(100)),
            reqwest::Client::new(),
        );
        let err = cemm.smart_meter("p1").await.unwrap_err();

        assert!(matches!(
            err,
            Error::Connection(ConnectionError::Timeout(t)) if t == Duration::from_millis(100)
        ));
    }

    #[tokio::test]
    async fn refused_connection_is_connection_error() {
        let cemm = Cemm::with_config(
            HttpConfig::new("127.0.0.1")
                .with_port(1)
                .with_timeout(Duration::from_secs(2)),
        )
        .unwrap();

        let err = cemm.device().await.unwrap_err();
        assert!(err.is_connection());
    }

    #[tokio::test]
    async fn wrong_content_type() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/open-api/v1/p1/realtime"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(fixture("smartmeter.json"), "blabla/blabla"),
            )
            .mount(&server)
            .await;

        let cemm = Cemm::new(server.uri()).unwrap();
        let err = cemm.smart_meter("p1").await.unwrap_err();

        match err {
            Error::UnexpectedResponse { content_type, body } => {
                assert_eq!(content_type, "blabla/blabla");
                assert!(body.contains("electric_power"));
            }
            other => panic!("expected UnexpectedResponse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn html_error_page_is_unexpected_response() {
        for status in [401, 403, 404, 500] {
            let server = MockServer::start().await;

            Mock::given(method("GET"))
                .and(path("/open-api/v1"))
                .respond_with(
                    ResponseTemplate::new(status)
                        .set_body_raw("<html><body>Give me energy!</body></html>", "text/html"),
                )
                .mount(&server)
                .await;

            let cemm = Cemm::new(server.uri()).unwrap();
            let err = cemm.device().await.unwrap_err();
            assert!(err.is_unexpected_response(), "status {status}: {err:?}");
        }
    }

    #[tokio::test]
    async fn json_error_status_is_connection_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/open-api/v1"))
            .respond_with(ResponseTemplate::new(500).set_body_raw("{\"status\":\"nok\"}", JSON))
            .mount(&server)
            .await;

        let cemm = Cemm::new(server.uri()).unwrap();
        let err = cemm.device().await.unwrap_err();

        assert!(matches!(
            err,
            Error::Connection(ConnectionError::Status { code: 500, .. })
        ));
    }

    #[tokio::test]
    async fn invalid_json_body_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/open-api/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{\"data\": ", JSON))
            .mount(&server)
            .await;

        let cemm = Cemm::new(server.uri()).unwrap();
        assert!(matches!(cemm.device().await, Err(Error::Parse(_))));
    }

    #[tokio::test]
    async fn shared_session_survives_close() {
        let server = MockServer::start().await;
        mount_fixture(&server, "/open-api/v1", "device.json").await;

        let shared = reqwest::Client::new();
        let cemm = Cemm::with_session(config(&server), shared.clone());
        cemm.device().await.unwrap();
        cemm.close();

        let response = shared
            .get(format!("{}/open-api/v1", server.uri()))
            .send()
            .await
            .unwrap();
        assert!(response.status().is_success());
    }
}

// ============================================================================
// Models
// ============================================================================

mod models {
    use super::*;

    #[tokio::test]
    async fn device() {
        let server = MockServer::start().await;
        mount_fixture(&server, "/open-api/v1", "device.json").await;

        let cemm = Cemm::new(server.uri()).unwrap();
        let device = cemm.device().await.unwrap();

        assert_eq!(device.model.as_deref(), Some("CEMM Plus"));
        assert_eq!(device.mac.as_deref(), Some("00:1e:c0:8f:2a:11"));
        assert_eq!(device.version.as_deref(), Some("2.26.0.0"));
        assert_eq!(device.core.as_deref(), Some("1.25"));
    }

    #[tokio::test]
    async fn connections() {
        let server = MockServer::start().await;
        mount_fixture(&server, "/open-api/v1/io", "connections.json").await;

        let cemm = Cemm::new(server.uri()).unwrap();
        let connections = cemm.connections().await.unwrap();

        let source: serde_json::Value =
            serde_json::from_str(&fixture("connections.json")).unwrap();
        let entries = source["data"].as_array().unwrap();
        assert_eq!(connections.len(), entries.len());
        for (connection, entry) in connections.iter().zip(entries) {
            assert_eq!(connection.io_id, entry["io_id"].as_i64());
            assert_eq!(connection.io_type.as_deref(), entry["type"].as_str());
            assert_eq!(connection.alias.as_deref(), entry["alias"].as_str());
        }
    }

    #[tokio::test]
    async fn connections_of_kind() {
        let server = MockServer::start().await;
        mount_fixture(&server, "/open-api/v1/io", "connections.json").await;

        let cemm = Cemm::new(server.uri()).unwrap();

        let water = cemm
            .connections_of_kind(ConnectionKind::WaterMeter)
            .await
            .unwrap();
        assert_eq!(water.len(), 1);
        assert_eq!(water[0].alias.as_deref(), Some("pulse-1"));

        let solar = cemm
            .connections_of_kind(ConnectionKind::SolarPanel)
            .await
            .unwrap();
        assert_eq!(solar[0].alias.as_deref(), Some("mb-5"));
    }

    #[tokio::test]
    async fn smart_meter() {
        let server = MockServer::start().await;
        mount_fixture(&server, "/open-api/v1/p1/realtime", "smartmeter.json").await;

        let cemm = Cemm::new(server.uri()).unwrap();
        let meter = cemm.smart_meter("p1").await.unwrap();

        assert_eq!(meter.power_flow, Some(193));
        assert_eq!(meter.energy_tariff_period, Some(TariffPeriod::Number(2)));
        assert_eq!(meter.billed_energy_high, Some(447.0));
        assert_eq!(meter.energy_consumption_high, Some(5459.44));
        assert_eq!(meter.energy_returned_high, Some(5012.44));
        assert_eq!(meter.gas_consumption, Some(3125.407));
    }

    #[tokio::test]
    async fn smart_meter_without_gas() {
        let server = MockServer::start().await;
        mount_fixture(&server, "/open-api/v1/p1/realtime", "smartmeter_no_gas.json").await;

        let cemm = Cemm::new(server.uri()).unwrap();
        let meter = cemm.smart_meter("p1").await.unwrap();

        assert_eq!(meter.power_flow, Some(-812));
        assert_eq!(meter.gas_consumption, None);
        assert_eq!(meter.energy_tariff_period, None);
        assert_eq!(meter.billed_energy_low, Some(312.0));
    }

    #[tokio::test]
    async fn smart_meter_with_float_form_integers() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/open-api/v1/p1/realtime"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": {
                    "electric_power": [1700000000, 193.0],
                    "gas": [1700000000, 12.5],
                    "rate": [1700000000, 2.0]
                },
                "totals": {}
            })))
            .mount(&server)
            .await;

        let cemm = Cemm::new(server.uri()).unwrap();
        let meter = cemm.smart_meter("p1").await.unwrap();

        assert_eq!(meter.power_flow, Some(193));
        assert_eq!(meter.energy_tariff_period, Some(TariffPeriod::Number(2)));
        assert_eq!(meter.gas_consumption, Some(12.5));
    }

    #[tokio::test]
    async fn device_with_missing_core() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/open-api/v1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "data": { "name": "CEMM", "mac": "00:1e:c0:8f:2a:11", "version": "2.20.1.0" }
            })))
            .mount(&server)
            .await;

        let cemm = Cemm::new(server.uri()).unwrap();
        let device = cemm.device().await.unwrap();

        assert_eq!(device.model.as_deref(), Some("CEMM"));
        assert_eq!(device.core, None);
    }

    #[tokio::test]
    async fn water_meter() {
        let server = MockServer::start().await;
        mount_fixture(&server, "/open-api/v1/pulse-1/realtime", "watermeter.json").await;

        let cemm = Cemm::new(server.uri()).unwrap();
        let meter = cemm.water_meter("pulse-1").await.unwrap();

        assert_eq!(meter.flow, Some(0.0));
        assert_eq!(meter.volume, Some(598.44));
    }

    #[tokio::test]
    async fn solar_panel() {
        let server = MockServer::start().await;
        mount_fixture(&server, "/open-api/v1/mb-5/realtime", "solarpanel.json").await;

        let cemm = Cemm::new(server.uri()).unwrap();
        let panel = cemm.solar_panel("mb-5").await.unwrap();

        assert_eq!(panel.power_flow, Some(-4.5));
        assert_eq!(panel.device_consumption_total, Some(37.91));
        assert_eq!(panel.gross_production_total, Some(5528.49));
        assert_eq!(panel.net_production_total, Some(5490.57));
    }

    #[tokio::test]
    async fn repeated_calls_yield_identical_records() {
        let server = MockServer::start().await;
        mount_fixture(&server, "/open-api/v1/mb-5/realtime", "solarpanel.json").await;
        mount_fixture(&server, "/open-api/v1/p1/realtime", "smartmeter.json").await;

        let cemm = Cemm::new(server.uri()).unwrap();

        assert_eq!(
            cemm.solar_panel("mb-5").await.unwrap(),
            cemm.solar_panel("mb-5").await.unwrap()
        );
        assert_eq!(
            cemm.smart_meter("p1").await.unwrap(),
            cemm.smart_meter("p1").await.unwrap()
        );
    }
}
