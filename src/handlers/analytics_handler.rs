use crate::errors::AnalyticsResult;
use crate::graph_db::GraphAnalytics;
use crate::models::{BfsRequest, BfsResponse, PagerankRequest};
use actix_web::{web, HttpResponse};
use std::sync::Arc;

pub async fn run_bfs(
    analytics: web::Data<Arc<dyn GraphAnalytics>>,
    req: web::Json<BfsRequest>,
) -> AnalyticsResult<HttpResponse> {
    let BfsRequest { start, targets } = req.into_inner();
    let paths = analytics.bfs(&start, targets).await?;

    Ok(HttpResponse::Ok().json(BfsResponse {
        path_count: paths.len(),
        paths,
    }))
}

pub async fn run_pagerank(
    analytics: web::Data<Arc<dyn GraphAnalytics>>,
    req: web::Json<PagerankRequest>,
) -> AnalyticsResult<HttpResponse> {
    let PagerankRequest {
        max_iterations,
        weight_property,
    } = req.into_inner();

    let extremes = analytics.pagerank(max_iterations, &weight_property).await?;
    Ok(HttpResponse::Ok().json(extremes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PathRecord, RankedNode, RankingExtremes, TargetSpec};
    use actix_web::{test, App};
    use serde_json::json;

    struct MockAnalytics;

    #[async_trait::async_trait]
    impl GraphAnalytics for MockAnalytics {
        async fn bfs(
            &self,
            start: &str,
            targets: TargetSpec,
        ) -> AnalyticsResult<Vec<PathRecord>> {
            if start == "Nowhere" {
                return Ok(Vec::new());
            }
            // Echo the normalized target count into the path so tests can
            // tell single-string and one-element-list inputs apart (they
            // must not differ).
            let count = targets.into_vec().len() as i64;
            Ok(vec![PathRecord {
                node_ids: vec![0, count, 7],
            }])
        }

        async fn pagerank(
            &self,
            max_iterations: u32,
            _weight_property: &str,
        ) -> AnalyticsResult<RankingExtremes> {
            if max_iterations == 0 {
                return Ok(RankingExtremes::Empty);
            }
            Ok(RankingExtremes::Extremes {
                top: RankedNode {
                    name: Some("Paris".to_string()),
                    score: Some(2.4),
                },
                bottom: RankedNode {
                    name: Some("Nice".to_string()),
                    score: Some(0.3),
                },
            })
        }
    }

    fn mock_backend() -> web::Data<Arc<dyn GraphAnalytics>> {
        let backend: Arc<dyn GraphAnalytics> = Arc::new(MockAnalytics);
        web::Data::new(backend)
    }

    #[actix_web::test]
    async fn test_bfs_route_shapes_response() {
        let app = test::init_service(
            App::new()
                .app_data(mock_backend())
                .route("/api/analytics/bfs", web::post().to(run_bfs)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/analytics/bfs")
            .set_json(json!({"start": "Paris", "targets": "Rome"}))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["path_count"], 1);
        assert_eq!(body["paths"][0]["node_ids"], json!([0, 1, 7]));
    }

    #[actix_web::test]
    async fn test_bfs_string_and_list_targets_are_equivalent() {
        let app = test::init_service(
            App::new()
                .app_data(mock_backend())
                .route("/api/analytics/bfs", web::post().to(run_bfs)),
        )
        .await;

        let as_string = test::TestRequest::post()
            .uri("/api/analytics/bfs")
            .set_json(json!({"start": "Paris", "targets": "Rome"}))
            .to_request();
        let as_list = test::TestRequest::post()
            .uri("/api/analytics/bfs")
            .set_json(json!({"start": "Paris", "targets": ["Rome"]}))
            .to_request();

        let first: serde_json::Value = test::call_and_read_body_json(&app, as_string).await;
        let second: serde_json::Value = test::call_and_read_body_json(&app, as_list).await;
        assert_eq!(first, second);
    }

    #[actix_web::test]
    async fn test_bfs_missing_start_returns_empty_list() {
        let app = test::init_service(
            App::new()
                .app_data(mock_backend())
                .route("/api/analytics/bfs", web::post().to(run_bfs)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/analytics/bfs")
            .set_json(json!({"start": "Nowhere", "targets": ["Rome"]}))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["path_count"], 0);
        assert_eq!(body["paths"], json!([]));
    }

    #[actix_web::test]
    async fn test_pagerank_route_returns_extremes_pair() {
        let app = test::init_service(
            App::new()
                .app_data(mock_backend())
                .route("/api/analytics/pagerank", web::post().to(run_pagerank)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/analytics/pagerank")
            .set_json(json!({"max_iterations": 20, "weight_property": "distance"}))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        let pair = body.as_array().unwrap();
        assert_eq!(pair.len(), 2);
        assert_eq!(pair[0]["name"], "Paris");
        assert_eq!(pair[1]["name"], "Nice");
    }

    #[actix_web::test]
    async fn test_pagerank_empty_ranking_yields_sentinel_pair() {
        let app = test::init_service(
            App::new()
                .app_data(mock_backend())
                .route("/api/analytics/pagerank", web::post().to(run_pagerank)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/analytics/pagerank")
            .set_json(json!({"max_iterations": 0, "weight_property": "distance"}))
            .to_request();

        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(
            body,
            json!([
                {"name": null, "score": null},
                {"name": null, "score": null}
            ])
        );
    }

    #[actix_web::test]
    async fn test_bfs_rejects_malformed_body() {
        let app = test::init_service(
            App::new()
                .app_data(mock_backend())
                .route("/api/analytics/bfs", web::post().to(run_bfs)),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/analytics/bfs")
            .set_json(json!({"start": "Paris", "targets": 42}))
            .to_request();

        let resp = test::call_service(&app, req).await;
        assert!(resp.status().is_client_error());
    }
}
