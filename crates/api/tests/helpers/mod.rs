#![allow(dead_code)]

use addd_api::{create_api_routes, AppState, RecordUseCases};
use addd_application::ports::{KeyValueStore, RecordRepository};
use addd_application::services::RecordCatalog;
use addd_application::use_cases::{
    CreateRecordUseCase, DeleteRecordUseCase, GetRecordsUseCase, UpdateRecordUseCase,
};
use addd_domain::{Record, RecordClass, RecordType};
use addd_infrastructure::store::MemoryKeyValueStore;
use axum::{
    body::Body,
    http::{Request, Response},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub const TOKEN: &str = "test-token";

pub struct TestApp {
    pub router: Router,
    pub catalog: Arc<RecordCatalog>,
    pub store: Arc<MemoryKeyValueStore>,
}

pub fn create_test_app(token: Option<&str>) -> TestApp {
    let store = Arc::new(MemoryKeyValueStore::new());
    let catalog = Arc::new(RecordCatalog::new(store.clone() as Arc<dyn KeyValueStore>));
    let repo: Arc<dyn RecordRepository> = catalog.clone();

    let state = AppState {
        records: RecordUseCases {
            get_records: Arc::new(GetRecordsUseCase::new(repo.clone())),
            create_record: Arc::new(CreateRecordUseCase::new(repo.clone())),
            update_record: Arc::new(UpdateRecordUseCase::new(repo.clone())),
            delete_record: Arc::new(DeleteRecordUseCase::new(repo)),
        },
        api_token: token.map(Arc::from),
    };

    TestApp {
        router: create_api_routes(state),
        catalog,
        store,
    }
}

impl TestApp {
    pub async fn seed(&self, name: &str, address: &str, record_type: RecordType) {
        let record = Record::new(name, address, record_type, RecordClass::IN, 300).unwrap();
        self.catalog.store_record(&record).await.unwrap();
    }

    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn delete(uri: &str) -> Request<Body> {
    Request::builder()
        .method("DELETE")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
