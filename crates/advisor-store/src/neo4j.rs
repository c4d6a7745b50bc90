//! Neo4j graph store over the HTTP transactional API

use crate::error::StoreError;
use crate::query::Query;
use crate::row::Row;
use crate::GraphStore;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Read-only client for `POST {uri}/db/{database}/tx/commit`.
pub struct Neo4jStore {
    client: reqwest::Client,
    endpoint: String,
    username: Option<String>,
    password: Option<String>,
}

impl Neo4jStore {
    pub fn new(uri: &str, database: &str, username: Option<String>, password: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: commit_endpoint(uri, database),
            username,
            password,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// `http://host:7474/` + `neo4j` → `http://host:7474/db/neo4j/tx/commit`
pub fn commit_endpoint(uri: &str, database: &str) -> String {
    format!("{}/db/{}/tx/commit", uri.trim_end_matches('/'), database)
}

#[derive(Debug, Serialize)]
struct CommitRequest<'a> {
    statements: Vec<Statement<'a>>,
}

#[derive(Debug, Serialize)]
struct Statement<'a> {
    statement: &'a str,
    parameters: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitResponse {
    #[serde(default)]
    results: Vec<StatementResult>,
    #[serde(default)]
    errors: Vec<Neo4jError>,
}

#[derive(Debug, Deserialize)]
struct StatementResult {
    columns: Vec<String>,
    #[serde(default)]
    data: Vec<DataRow>,
}

#[derive(Debug, Deserialize)]
struct DataRow {
    row: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct Neo4jError {
    code: String,
    message: String,
}

/// Decode a commit response body; anything that is not a commit result is malformed.
pub(crate) fn parse_response(bytes: &[u8]) -> Result<CommitResponse, StoreError> {
    serde_json::from_slice(bytes).map_err(|err| StoreError::MalformedRow {
        column: "results".to_string(),
        reason: format!("response body is not a commit result: {err}"),
    })
}

/// Map a commit response body onto rows of the first statement.
pub(crate) fn rows_from_response(response: CommitResponse) -> Result<Vec<Row>, StoreError> {
    if let Some(err) = response.errors.into_iter().next() {
        return Err(StoreError::Rejected {
            code: err.code,
            message: err.message,
        });
    }
    let Some(result) = response.results.into_iter().next() else {
        return Ok(Vec::new());
    };
    Ok(result
        .data
        .into_iter()
        .map(|data| Row::from_columns(&result.columns, data.row))
        .collect())
}

#[async_trait::async_trait]
impl GraphStore for Neo4jStore {
    async fn run(&self, query: &Query) -> Result<Vec<Row>, StoreError> {
        let body = CommitRequest {
            statements: vec![Statement {
                statement: query.cypher(),
                parameters: query.params(),
            }],
        };

        tracing::debug!("neo4j: running {}", query.name());
        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(username) = &self.username {
            request = request.basic_auth(username, self.password.as_deref());
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(StoreError::Unavailable(format!("HTTP {}: {}", status, error_text)));
        }

        let bytes = response.bytes().await?;
        rows_from_response(parse_response(&bytes)?)
    }

    fn name(&self) -> &str {
        "neo4j"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(body: Value) -> CommitResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_commit_endpoint() {
        assert_eq!(
            commit_endpoint("http://localhost:7474/", "neo4j"),
            "http://localhost:7474/db/neo4j/tx/commit"
        );
        assert_eq!(
            commit_endpoint("https://db.example.com", "courses"),
            "https://db.example.com/db/courses/tx/commit"
        );
    }

    #[test]
    fn test_rows_from_response() {
        let body = parse(json!({
            "results": [{
                "columns": ["group_id", "prereq_courses"],
                "data": [
                    { "row": ["g1", ["MATH 20B"]], "meta": [null, null] },
                    { "row": ["g2", ["MATH 10B", "MATH 20B"]], "meta": [null, null] }
                ]
            }],
            "errors": []
        }));

        let rows = rows_from_response(body).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].str("group_id").unwrap(), "g2");
        assert_eq!(rows[1].strings("prereq_courses").unwrap(), vec!["MATH 10B", "MATH 20B"]);
    }

    #[test]
    fn test_errors_become_rejections() {
        let body = parse(json!({
            "results": [],
            "errors": [{ "code": "Neo.ClientError.Statement.SyntaxError", "message": "bad" }]
        }));

        match rows_from_response(body) {
            Err(StoreError::Rejected { code, message }) => {
                assert_eq!(code, "Neo.ClientError.Statement.SyntaxError");
                assert_eq!(message, "bad");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_request_body_shape() {
        let query = Query::CourseInfo {
            course_id: "MATH 20C".to_string(),
        };
        let body = CommitRequest {
            statements: vec![Statement {
                statement: query.cypher(),
                parameters: query.params(),
            }],
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["statements"][0]["parameters"]["course_id"], "MATH 20C");
        assert!(value["statements"][0]["statement"]
            .as_str()
            .unwrap()
            .contains("MATCH (c:Course {course_id: $course_id})"));
    }

    #[test]
    fn test_undecodable_body_is_malformed() {
        match parse_response(b"<html>gateway</html>") {
            Err(StoreError::MalformedRow { column, reason }) => {
                assert_eq!(column, "results");
                assert!(reason.starts_with("response body is not a commit result"));
            }
            other => panic!("unexpected: {other:?}"),
        }
        assert!(parse_response(br#"{"results": [], "errors": []}"#).is_ok());
    }

    /// Serve one canned HTTP response and return the base URI.
    async fn serve_once(response: &'static str) -> String {
        use tokio::io::{AsyncReadExt, AsyncWriteExt};

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
                let text = String::from_utf8_lossy(&received);
                if let Some(end) = text.find("\r\n\r\n") {
                    let length = text[..end]
                        .lines()
                        .find_map(|line| {
                            let (name, value) = line.split_once(':')?;
                            name.eq_ignore_ascii_case("content-length")
                                .then(|| value.trim().parse::<usize>().ok())
                                .flatten()
                        })
                        .unwrap_or(0);
                    if received.len() >= end + 4 + length {
                        break;
                    }
                }
            }
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_error_status_is_unavailable() {
        let uri = serve_once(
            "HTTP/1.1 503 Service Unavailable\r\nContent-Length: 4\r\nConnection: close\r\n\r\ndown",
        )
        .await;
        let store = Neo4jStore::new(&uri, "neo4j", None, None);
        match store.run(&Query::MilestoneCourses).await {
            Err(StoreError::Unavailable(message)) => {
                assert!(message.contains("503"), "{message}");
                assert!(message.ends_with("down"), "{message}");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_non_json_success_is_malformed() {
        let uri = serve_once(
            "HTTP/1.1 200 OK\r\nContent-Type: text/html\r\nContent-Length: 6\r\nConnection: close\r\n\r\n<html>",
        )
        .await;
        let store = Neo4jStore::new(&uri, "neo4j", None, None);
        let result = store.run(&Query::MilestoneCourses).await;
        assert!(matches!(result, Err(StoreError::MalformedRow { .. })), "{result:?}");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_unavailable() {
        let store = Neo4jStore::new("http://127.0.0.1:1", "neo4j", None, None);
        let result = store.run(&Query::MilestoneCourses).await;
        assert!(matches!(result, Err(StoreError::Unavailable(_))));
    }
}
