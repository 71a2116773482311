//! Query parameters and request URL generation.

use url::Url;

use super::PageIndex;

/// Optional query parameters sent alongside `page`.
///
/// Unset by default, which makes the request exactly
/// `GET {endpoint}?page={N}`. There is no `limit`: the table's row offsets
/// assume the API's default page size.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageQuery {
    /// `fields`: restricts the returned attributes.
    pub fields: Vec<String>,
}

impl PageQuery {
    /// Builds the URL for a zero-based page index.
    ///
    /// Existing query parameters on the endpoint are kept.
    pub fn url(&self, endpoint: &Url, index: PageIndex) -> Url {
        let mut url = endpoint.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("page", &index.page_number().to_string());
            if !self.fields.is_empty() {
                pairs.append_pair("fields", &self.fields.join(","));
            }
        }
        url
    }
}
