//! HTTP client for the Shipyard REST API.

use reqwest::{Client, RequestBuilder, Response};
use serde::Deserialize;
use shipyard_core::{PageRequest, Ship, ShipDraft, ShipOrder};

use crate::CliResult;

/// Query filters sent to list and count, already in wire form.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct ShipQuery {
    pairs: Vec<(&'static str, String)>,
}

impl ShipQuery {
    /// Add `key=value` when `value` is present.
    pub(crate) fn push<T: ToString>(&mut self, key: &'static str, value: Option<T>) -> &mut Self {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
        self
    }

    fn with_paging(&self, order: Option<ShipOrder>, page: Option<PageRequest>) -> Self {
        let mut query = self.clone();
        query.push("order", order);
        if let Some(page) = page {
            query.push("pageNumber", Some(page.number));
            query.push("pageSize", Some(page.size));
        }
        query
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

/// Thin wrapper over the `/rest/ships` endpoints.
pub(crate) struct ShipyardClient {
    client: Client,
    base_url: String,
}

impl ShipyardClient {
    /// Build a client for the server at `server_url`.
    pub(crate) fn new(server_url: &str) -> CliResult<Self> {
        let trimmed = server_url.trim();
        if trimmed.is_empty() {
            return Err("server url is required".into());
        }
        let client = Client::builder().user_agent("shipyard-cli").build()?;
        Ok(Self {
            client,
            base_url: trimmed.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/rest/ships{path}", self.base_url)
    }

    /// Fetch one page of ships.
    pub(crate) async fn list(
        &self,
        query: &ShipQuery,
        order: Option<ShipOrder>,
        page: Option<PageRequest>,
    ) -> CliResult<Vec<Ship>> {
        let query = query.with_paging(order, page);
        let request = self.client.get(self.url("")).query(&query.pairs);
        Ok(send(request).await?.json().await?)
    }

    /// Count ships matching `query`.
    pub(crate) async fn count(&self, query: &ShipQuery) -> CliResult<u64> {
        let request = self.client.get(self.url("/count")).query(&query.pairs);
        Ok(send(request).await?.json().await?)
    }

    /// Fetch a single ship.
    pub(crate) async fn get(&self, id: &str) -> CliResult<Ship> {
        let request = self.client.get(self.url(&format!("/{id}")));
        Ok(send(request).await?.json().await?)
    }

    /// Create a ship.
    pub(crate) async fn create(&self, draft: &ShipDraft) -> CliResult<Ship> {
        let request = self.client.post(self.url("")).json(draft);
        Ok(send(request).await?.json().await?)
    }

    /// Apply a partial update.
    pub(crate) async fn update(&self, id: &str, patch: &ShipDraft) -> CliResult<Ship> {
        let request = self.client.post(self.url(&format!("/{id}"))).json(patch);
        Ok(send(request).await?.json().await?)
    }

    /// Delete a ship.
    pub(crate) async fn delete(&self, id: &str) -> CliResult<()> {
        let request = self.client.delete(self.url(&format!("/{id}")));
        send(request).await?;
        Ok(())
    }
}

async fn send(request: RequestBuilder) -> CliResult<Response> {
    let response = request.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => "no details".to_string(),
    };
    Err(format!("server returned {status}: {message}").into())
}

#[cfg(test)]
mod tests {
    use super::{ShipQuery, ShipyardClient};
    use httpmock::Method::{DELETE, GET, POST};
    use httpmock::MockServer;
    use serde_json::json;
    use shipyard_core::{PageRequest, ShipDraft, ShipOrder};

    fn ship_json(id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "name": "Enterprise",
            "planet": "Earth",
            "shipType": "MILITARY",
            "prodDate": 32503680000000_i64,
            "isUsed": false,
            "speed": 0.5,
            "crewSize": 100,
            "rating": 2.0
        })
    }

    #[test]
    fn rejects_blank_server_url() {
        assert!(ShipyardClient::new("  ").is_err());
    }

    #[test]
    fn query_skips_absent_values() {
        let mut query = ShipQuery::default();
        query
            .push("name", Some("Ent"))
            .push::<f64>("minSpeed", None)
            .push("isUsed", Some(false));

        assert_eq!(
            query.pairs,
            vec![("name", "Ent".to_string()), ("isUsed", "false".to_string())]
        );
    }

    #[tokio::test]
    async fn list_sends_filters_order_and_page() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/ships")
                    .query_param("minSpeed", "0.6")
                    .query_param("order", "RATING")
                    .query_param("pageNumber", "1")
                    .query_param("pageSize", "5");
                then.status(200).json_body(json!([ship_json(4)]));
            })
            .await;
        let client = ShipyardClient::new(&server.base_url()).expect("client");
        let mut query = ShipQuery::default();
        query.push("minSpeed", Some(0.6));

        let ships = client
            .list(
                &query,
                Some(ShipOrder::Rating),
                Some(PageRequest::new(Some(1), Some(5))),
            )
            .await
            .expect("list");

        mock.assert_async().await;
        assert_eq!(ships.len(), 1);
        assert_eq!(ships[0].id, 4);
    }

    #[tokio::test]
    async fn count_reads_plain_number() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/ships/count");
                then.status(200).body("12");
            })
            .await;
        let client = ShipyardClient::new(&server.base_url()).expect("client");

        let count = client.count(&ShipQuery::default()).await.expect("count");
        assert_eq!(count, 12);
    }

    #[tokio::test]
    async fn get_reads_single_ship() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/rest/ships/5");
                then.status(200).json_body(ship_json(5));
            })
            .await;
        let client = ShipyardClient::new(&server.base_url()).expect("client");

        let ship = client.get("5").await.expect("get");
        mock.assert_async().await;
        assert_eq!(ship.name, "Enterprise");
        assert_eq!(ship.rating, 2.0);
    }

    #[tokio::test]
    async fn create_posts_draft_to_collection() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/ships")
                    .json_body_partial(r#"{ "name": "Enterprise", "crewSize": 100 }"#);
                then.status(200).json_body(ship_json(1));
            })
            .await;
        let client = ShipyardClient::new(&server.base_url()).expect("client");
        let draft = ShipDraft {
            name: Some("Enterprise".to_string()),
            crew_size: Some(100),
            ..ShipDraft::default()
        };

        let ship = client.create(&draft).await.expect("create");
        mock.assert_async().await;
        assert_eq!(ship.id, 1);
    }

    #[tokio::test]
    async fn update_posts_patch_to_ship_path() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/ships/3")
                    .json_body(json!({ "isUsed": true }));
                then.status(200).json_body(ship_json(3));
            })
            .await;
        let client = ShipyardClient::new(&server.base_url()).expect("client");
        let patch = ShipDraft {
            is_used: Some(true),
            ..ShipDraft::default()
        };

        let ship = client.update("3", &patch).await.expect("update");
        mock.assert_async().await;
        assert_eq!(ship.id, 3);
    }

    #[tokio::test]
    async fn errors_surface_server_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(DELETE).path("/rest/ships/9");
                then.status(404)
                    .json_body(json!({ "message": "ship 9 not found" }));
            })
            .await;
        let client = ShipyardClient::new(&server.base_url()).expect("client");

        let err = client.delete("9").await.expect_err("missing ship");
        let message = err.to_string();
        assert!(message.contains("404"));
        assert!(message.contains("ship 9 not found"));
    }
}
