#![allow(clippy::unused_async, unused_must_use)]
//! Full lookup flow: selection session against a stubbed upstream catalog,
//! completed consultation persisted through the history HTTP API.

use std::sync::Arc;
use std::time::Duration;

use mockito::Server as UpstreamServer;
use salvo::http::StatusCode;
use serde_json::json;

use fipe_test::component::catalog::{
    CachedCatalog, CatalogClient, LookupSession, OptimisticHistory, Stage,
};
use fipe_test::component::types::{VehicleType, displayable_records};

use super::helpers::*;

/// ## Summary
/// Drives a whole session - type, brand, model, year, consult - against a
/// stubbed catalog, then appends the produced record over HTTP and reads it
/// back as the newest history entry.
#[test_log::test(tokio::test)]
async fn completed_lookup_lands_in_history() {
    let mut upstream = UpstreamServer::new_async().await;
    let _brands = upstream
        .mock("GET", "/carros/marcas")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"codigo": "21", "nome": "Fiat"}]"#)
        .create_async()
        .await;
    let _models = upstream
        .mock("GET", "/carros/marcas/21/modelos")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"modelos": [{"codigo": 4828, "nome": "Uno Mille"}], "anos": []}).to_string(),
        )
        .create_async()
        .await;
    let _years = upstream
        .mock("GET", "/carros/marcas/21/modelos/4828/anos")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"codigo": "2015-1", "nome": "2015 Gasolina"}]"#)
        .create_async()
        .await;
    let _price = upstream
        .mock("GET", "/carros/marcas/21/modelos/4828/anos/2015-1")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "Valor": "R$ 25.000,00",
                "Marca": "Fiat",
                "Modelo": "Uno Mille",
                "AnoModelo": 2015,
                "Combustivel": "Gasolina",
                "CodigoFipe": "001004-9",
                "MesReferencia": "julho de 2025",
                "TipoVeiculo": 1,
                "SiglaCombustivel": "G",
            })
            .to_string(),
        )
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let history_file = dir.path().join("historico.json");
    let service = create_history_service(&history_file);

    let client = CatalogClient::new(upstream.url(), Duration::from_secs(5))
        .expect("catalog client should build");
    let mut session = LookupSession::new(Arc::new(CachedCatalog::new(client)));

    session.select_vehicle_type(VehicleType::Car);
    session.refresh_brands().await.expect("brands");
    session.select_brand("21");
    session.refresh_models().await.expect("models");
    session.select_model(4828);
    session.refresh_years().await.expect("years");
    session.select_year("2015");

    let (priced, record) = session.consult().await.expect("consult");
    assert_eq!(session.stage(), Stage::ResultReady);
    assert_eq!(priced.value, "R$ 25.000,00");

    // The UI layer appends exactly one record per successful consultation,
    // showing it optimistically while the POST is in flight
    let record_value = serde_json::to_value(&record).expect("record should serialize");
    let mut optimistic = OptimisticHistory::new();
    let token = optimistic.insert_tentative(record_value.clone());

    let response = TestRequest::post("/historico")
        .json_body(&record_value)
        .send(&service)
        .await
        .assert_status(StatusCode::CREATED);
    assert_eq!(response.body_json(), json!({"ok": true}));
    assert!(optimistic.commit(token));
    assert_eq!(optimistic.len(), 1);

    let body = TestRequest::get("/historico")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .body_json();

    let raw = body.as_array().expect("array body");
    assert_eq!(raw[0], record_value);

    let displayable = displayable_records(raw);
    assert_eq!(displayable.len(), 1);
    assert_eq!(displayable[0].brand, "Fiat");
    assert_eq!(displayable[0].year, "2015");
}

/// ## Summary
/// A failed price fetch blocks progression and leaves the history service
/// untouched; the session can retry from where it stood.
#[test_log::test(tokio::test)]
async fn failed_consultation_appends_nothing() {
    let mut upstream = UpstreamServer::new_async().await;
    let _brands = upstream
        .mock("GET", "/carros/marcas")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"codigo": "21", "nome": "Fiat"}]"#)
        .create_async()
        .await;
    let _models = upstream
        .mock("GET", "/carros/marcas/21/modelos")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({"modelos": [{"codigo": 4828, "nome": "Uno Mille"}], "anos": []}).to_string(),
        )
        .create_async()
        .await;
    let _years = upstream
        .mock("GET", "/carros/marcas/21/modelos/4828/anos")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"codigo": "2015-1", "nome": "2015 Gasolina"}]"#)
        .create_async()
        .await;
    let _price = upstream
        .mock("GET", "/carros/marcas/21/modelos/4828/anos/2015-1")
        .with_status(502)
        .create_async()
        .await;

    let dir = tempfile::tempdir().expect("tempdir");
    let history_file = dir.path().join("historico.json");
    let service = create_history_service(&history_file);

    let client = CatalogClient::new(upstream.url(), Duration::from_secs(5))
        .expect("catalog client should build");
    let mut session = LookupSession::new(Arc::new(CachedCatalog::new(client)));

    session.select_vehicle_type(VehicleType::Car);
    session.refresh_brands().await.expect("brands");
    session.select_brand("21");
    session.refresh_models().await.expect("models");
    session.select_model(4828);
    session.refresh_years().await.expect("years");
    session.select_year("2015");

    assert!(session.consult().await.is_err());
    assert_eq!(session.stage(), Stage::YearSelected);

    let body = TestRequest::get("/historico")
        .send(&service)
        .await
        .assert_status(StatusCode::OK)
        .body_json();
    assert_eq!(body, json!([]));
}

/// ## Summary
/// A failed persist surfaces as 500 and the optimistic insert is reverted
/// by its token, leaving previously committed entries alone.
#[test_log::test(tokio::test)]
async fn failed_persist_reverts_optimistic_insert() {
    let dir = tempfile::tempdir().expect("tempdir");
    // The backing path is a directory, so every write fails
    let service = create_history_service(dir.path());

    let committed = json!({"tipo": "carros", "marca": "Fiat", "modelo": "Uno", "ano": "2014"});
    let mut optimistic = OptimisticHistory::from_persisted(vec![committed.clone()]);

    let record = json!({"tipo": "carros", "marca": "Fiat", "modelo": "Uno", "ano": "2015"});
    let token = optimistic.insert_tentative(record.clone());
    assert_eq!(optimistic.len(), 2);

    TestRequest::post("/historico")
        .json_body(&record)
        .send(&service)
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR);

    assert!(optimistic.revert(token));
    assert_eq!(optimistic.records(), vec![&committed]);
}
