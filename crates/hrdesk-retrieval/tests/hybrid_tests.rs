// SPDX-FileCopyrightText: 2026 HR Desk Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Hybrid retriever against a mocked Pinecone data plane.

use std::sync::Arc;

use hrdesk_config::model::{PineconeConfig, RetrievalConfig};
use hrdesk_core::{HrDeskError, RetrieverAdapter};
use hrdesk_retrieval::{Bm25Encoder, HybridRetriever};
use hrdesk_test_utils::MockEmbedder;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pinecone_config(host: &str) -> PineconeConfig {
    PineconeConfig {
        api_key: Some("test-key".into()),
        index_host: Some(host.to_string()),
        ..PineconeConfig::default()
    }
}

fn write_params(dir: &tempfile::TempDir) -> RetrievalConfig {
    let mut encoder = Bm25Encoder::new().unwrap();
    encoder.fit(&[
        "Employees receive twenty days of annual leave.",
        "The travel policy covers flights and hotels.",
    ]);
    let params_path = dir.path().join("bm25_values.json");
    encoder.dump(&params_path).unwrap();

    RetrievalConfig {
        bm25_params_path: params_path.to_string_lossy().into_owned(),
        top_k: 2,
        alpha: 0.5,
        ..RetrievalConfig::default()
    }
}

#[tokio::test]
async fn retrieves_passages_from_hybrid_query() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .and(header("Api-Key", "test-key"))
        .and(header("X-Pinecone-API-Version", "2025-01"))
        .and(body_partial_json(json!({
            "vector": [0.5, 0.5, 0.5],
            "topK": 2,
            "includeMetadata": true,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "matches": [
                {"id": "a", "score": 0.9, "metadata": {"context": "Leave is twenty days.", "source": "leave.pdf"}},
                {"id": "b", "score": 0.4, "metadata": {"source": "orphan.pdf"}},
            ]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let retrieval = write_params(&dir);
    let embedder = Arc::new(MockEmbedder::new(3, 1.0));
    let retriever = HybridRetriever::build(&retrieval, &pinecone_config(&server.uri()), embedder)
        .await
        .unwrap();

    let passages = retriever.retrieve("How much annual leave?").await.unwrap();
    assert_eq!(passages.len(), 1);
    assert_eq!(passages[0].text, "Leave is twenty days.");
    assert_eq!(passages[0].score, Some(0.9));
    assert_eq!(passages[0].metadata["source"], json!("leave.pdf"));
}

#[tokio::test]
async fn query_error_status_is_retrieval_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let retrieval = write_params(&dir);
    let embedder = Arc::new(MockEmbedder::new(3, 1.0));
    let retriever = HybridRetriever::build(&retrieval, &pinecone_config(&server.uri()), embedder)
        .await
        .unwrap();

    let err = retriever.retrieve("leave").await.unwrap_err();
    assert!(matches!(err, HrDeskError::Retrieval { .. }));
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn missing_params_file_means_unavailable() {
    let retrieval = RetrievalConfig {
        bm25_params_path: "/nonexistent/bm25_values.json".into(),
        ..RetrievalConfig::default()
    };
    let embedder = Arc::new(MockEmbedder::new(3, 1.0));
    let result =
        HybridRetriever::build(&retrieval, &pinecone_config("http://127.0.0.1:1"), embedder).await;
    assert!(matches!(result, Err(HrDeskError::RetrieverUnavailable(_))));
}

#[tokio::test]
async fn index_name_resolves_host_through_control_plane() {
    let data_plane = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"matches": []})))
        .expect(1)
        .mount(&data_plane)
        .await;

    let control_plane = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/indexes/hr-policies"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"host": data_plane.uri()})))
        .expect(1)
        .mount(&control_plane)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let retrieval = write_params(&dir);
    let pinecone = PineconeConfig {
        api_key: Some("test-key".into()),
        index_name: Some("hr-policies".into()),
        controller_url: control_plane.uri(),
        ..PineconeConfig::default()
    };
    let embedder = Arc::new(MockEmbedder::new(3, 1.0));
    let retriever = HybridRetriever::build(&retrieval, &pinecone, embedder)
        .await
        .unwrap();

    assert!(retriever.retrieve("travel").await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_api_key_means_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let retrieval = write_params(&dir);
    let pinecone = PineconeConfig {
        api_key: None,
        index_host: Some("http://127.0.0.1:1".into()),
        ..PineconeConfig::default()
    };
    let embedder = Arc::new(MockEmbedder::new(3, 1.0));
    let result = HybridRetriever::build(&retrieval, &pinecone, embedder).await;
    assert!(matches!(result, Err(HrDeskError::RetrieverUnavailable(_))));
}
