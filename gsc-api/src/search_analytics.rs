//! Search Analytics query types, per-window fetching, and row flattening.

use crate::credentials::GscClient;
use crate::date_window::DateWindow;
use crate::error::{GscError, Result};
use serde::{Deserialize, Serialize};
use url::Url;

/// Date format used in Search Analytics request bodies: "YYYY-MM-DD".
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Default grouping dimensions, in column order.
pub const DEFAULT_DIMENSIONS: [&str; 5] = ["query", "page", "date", "device", "country"];

/// Default per-query row cap. The API truncates result sets at this
/// limit without any marker in the response; rows past it would need
/// startRow pagination, which this client does not issue.
pub const DEFAULT_ROW_LIMIT: u32 = 25_000;

const API_BASE: &str = "https://www.googleapis.com/webmasters/v3/sites";

/// Request body for `searchAnalytics/query`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest<'a> {
    start_date: String,
    end_date: String,
    dimensions: &'a [String],
    row_limit: u32,
    start_row: u32,
}

/// Response body for `searchAnalytics/query`. The `rows` field is absent
/// entirely when the window has no data.
#[derive(Debug, Default, Deserialize)]
pub struct QueryResponse {
    #[serde(default)]
    pub rows: Vec<ApiRow>,
}

/// One aggregated row as returned by the API: dimension values in `keys`,
/// ordered like the requested dimension list, plus four metrics.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiRow {
    #[serde(default)]
    pub keys: Vec<String>,
    pub clicks: f64,
    pub impressions: f64,
    pub ctr: f64,
    pub position: f64,
}

/// A flattened analytics row: each configured dimension name paired with
/// its value, in column order, plus the metrics carried verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsRow {
    pub dimensions: Vec<(String, String)>,
    pub clicks: f64,
    pub impressions: f64,
    pub ctr: f64,
    pub position: f64,
}

/// Fetch one window of search analytics for a property.
///
/// Issues a single first-page query (`startRow` 0) and flattens the
/// response rows. A window with no matching rows yields an empty vector,
/// not an error. Transport failures and non-success statuses surface as
/// [`GscError`] with no retry.
pub async fn fetch_window(
    client: &GscClient,
    site_url: &str,
    window: DateWindow,
    dimensions: &[String],
    row_limit: u32,
) -> Result<Vec<AnalyticsRow>> {
    let endpoint = query_endpoint(site_url)?;
    let request = QueryRequest {
        start_date: window.start_date.format(DATE_FORMAT).to_string(),
        end_date: window.end_date.format(DATE_FORMAT).to_string(),
        dimensions,
        row_limit,
        start_row: 0,
    };

    let response = client
        .http()
        .post(endpoint)
        .bearer_auth(client.bearer())
        .json(&request)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await?;
        return Err(GscError::Api { status, body });
    }

    let parsed: QueryResponse = response.json().await?;
    flatten_response(parsed, dimensions)
}

/// Zip each response row's keys against the configured dimension list.
///
/// Alignment is positional: the API returns keys in the order the
/// dimensions were requested. A row whose key count differs from that
/// list is rejected here, naming the row shape, rather than surfacing
/// later as a short CSV record.
pub fn flatten_response(response: QueryResponse, dimensions: &[String]) -> Result<Vec<AnalyticsRow>> {
    response
        .rows
        .into_iter()
        .map(|row| {
            if row.keys.len() != dimensions.len() {
                return Err(GscError::MalformedRow {
                    expected: dimensions.len(),
                    found: row.keys.len(),
                });
            }
            Ok(AnalyticsRow {
                dimensions: dimensions.iter().cloned().zip(row.keys).collect(),
                clicks: row.clicks,
                impressions: row.impressions,
                ctr: row.ctr,
                position: row.position,
            })
        })
        .collect()
}

/// Build the query endpoint with the property URL encoded as one path
/// segment (slashes included).
fn query_endpoint(site_url: &str) -> Result<Url> {
    let mut endpoint =
        Url::parse(API_BASE).map_err(|e| GscError::InvalidSiteUrl(e.to_string()))?;
    endpoint
        .path_segments_mut()
        .map_err(|_| GscError::InvalidSiteUrl(site_url.to_string()))?
        .push(site_url)
        .push("searchAnalytics")
        .push("query");
    Ok(endpoint)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STR_RESULT: &str = r#"{
        "rows": [
            {
                "keys": ["rust csv writer", "https://example.com/blog/csv", "2024-05-01", "DESKTOP", "usa"],
                "clicks": 12.0,
                "impressions": 340.0,
                "ctr": 0.0353,
                "position": 4.7
            },
            {
                "keys": ["search console export", "https://example.com/", "2024-05-02", "MOBILE", "deu"],
                "clicks": 3.0,
                "impressions": 95.0,
                "ctr": 0.0316,
                "position": 11.2
            }
        ],
        "responseAggregationType": "byPage"
    }"#;

    fn dimensions() -> Vec<String> {
        DEFAULT_DIMENSIONS.iter().map(|d| d.to_string()).collect()
    }

    #[test]
    fn test_flatten_aligns_keys_with_dimensions() {
        let response: QueryResponse = serde_json::from_str(STR_RESULT).unwrap();
        let rows = flatten_response(response, &dimensions()).unwrap();
        assert_eq!(rows.len(), 2);

        let first = &rows[0];
        assert_eq!(first.dimensions.len(), 5);
        assert_eq!(
            first.dimensions[0],
            ("query".to_string(), "rust csv writer".to_string())
        );
        assert_eq!(
            first.dimensions[1],
            (
                "page".to_string(),
                "https://example.com/blog/csv".to_string()
            )
        );
        assert_eq!(first.dimensions[2].1, "2024-05-01");
        assert_eq!(first.dimensions[3].1, "DESKTOP");
        assert_eq!(first.dimensions[4].1, "usa");
        assert_eq!(first.clicks, 12.0);
        assert_eq!(first.impressions, 340.0);
        assert_eq!(first.ctr, 0.0353);
        assert_eq!(first.position, 4.7);

        assert_eq!(rows[1].dimensions[3].1, "MOBILE");
    }

    #[test]
    fn test_missing_rows_field_is_empty_not_an_error() {
        let response: QueryResponse =
            serde_json::from_str(r#"{"responseAggregationType": "byPage"}"#).unwrap();
        let rows = flatten_response(response, &dimensions()).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_short_keys_row_is_rejected_not_truncated() {
        let response: QueryResponse = serde_json::from_str(
            r#"{"rows": [{"keys": ["only", "two"],
                "clicks": 1, "impressions": 10, "ctr": 0.1, "position": 2}]}"#,
        )
        .unwrap();
        let err = flatten_response(response, &dimensions()).unwrap_err();
        assert!(matches!(
            err,
            GscError::MalformedRow {
                expected: 5,
                found: 2
            }
        ));
    }

    #[test]
    fn test_absent_keys_row_is_rejected() {
        let response: QueryResponse = serde_json::from_str(
            r#"{"rows": [{"clicks": 1, "impressions": 10, "ctr": 0.1, "position": 2}]}"#,
        )
        .unwrap();
        let err = flatten_response(response, &dimensions()).unwrap_err();
        assert!(matches!(err, GscError::MalformedRow { found: 0, .. }));
    }

    #[test]
    fn test_integral_metrics_parse_without_decimal_point() {
        let response: QueryResponse = serde_json::from_str(
            r#"{"rows": [{"keys": ["q", "p", "2024-05-01", "DESKTOP", "usa"],
                "clicks": 7, "impressions": 120, "ctr": 0.05833, "position": 6}]}"#,
        )
        .unwrap();
        let rows = flatten_response(response, &dimensions()).unwrap();
        assert_eq!(rows[0].clicks, 7.0);
        assert_eq!(rows[0].impressions, 120.0);
    }

    #[test]
    fn test_request_body_uses_api_field_names() {
        let dims = dimensions();
        let request = QueryRequest {
            start_date: "2024-01-01".to_string(),
            end_date: "2024-03-31".to_string(),
            dimensions: &dims,
            row_limit: DEFAULT_ROW_LIMIT,
            start_row: 0,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["startDate"], "2024-01-01");
        assert_eq!(json["endDate"], "2024-03-31");
        assert_eq!(json["rowLimit"], 25_000);
        assert_eq!(json["startRow"], 0);
        assert_eq!(json["dimensions"][0], "query");
        assert_eq!(json["dimensions"][4], "country");
    }

    #[test]
    fn test_query_endpoint_encodes_site_url_as_one_segment() {
        let endpoint = query_endpoint("https://example.com/").unwrap();
        let path = endpoint.path();
        assert!(path.contains("%2F%2Fexample.com%2F"));
        assert!(path.ends_with("/searchAnalytics/query"));
        // The property URL's slashes must not create extra path segments.
        assert_eq!(path.matches("/searchAnalytics").count(), 1);
    }

    #[test]
    fn test_query_endpoint_domain_property() {
        let endpoint = query_endpoint("sc-domain:example.com").unwrap();
        assert!(endpoint.path().contains("sc-domain:example.com"));
    }
}
