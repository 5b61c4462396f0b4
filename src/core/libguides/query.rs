use super::ParamBag;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOperator {
    And,
    Or,
    Not,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub string: String,
    pub handler: Option<String>,
}

impl Query {
    pub fn new(string: impl Into<String>) -> Self {
        Self {
            string: string.into(),
            handler: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryGroup {
    pub operator: BooleanOperator,
    pub queries: Vec<QueryInput>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryInput {
    Single(Query),
    Group(QueryGroup),
}

impl QueryInput {
    pub fn simple(string: impl Into<String>) -> Self {
        QueryInput::Single(Query::new(string))
    }

    /// All leaf terms in document order.
    pub fn terms(&self) -> Vec<&str> {
        match self {
            QueryInput::Single(query) => vec![query.string.as_str()],
            QueryInput::Group(group) => group.queries.iter().flat_map(|q| q.terms()).collect(),
        }
    }
}

/// Turns a query into LibGuides request parameters.
///
/// LibGuides only takes a free-text `search`, so groups are flattened and
/// their boolean operators dropped.
#[derive(Debug, Clone, Default)]
pub struct QueryBuilder;

impl QueryBuilder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(&self, query: &QueryInput) -> ParamBag {
        let mut params = ParamBag::new();
        params.set("search", Self::query_to_string(query));
        params
    }

    fn query_to_string(query: &QueryInput) -> String {
        match query {
            QueryInput::Single(single) => single.string.trim().to_string(),
            QueryInput::Group(_) => query
                .terms()
                .into_iter()
                .map(str::trim)
                .filter(|term| !term.is_empty())
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_single_query() {
        let params = QueryBuilder::new().build(&QueryInput::simple(" civil war "));
        assert_eq!(params.get_first("search"), Some("civil war"));
    }

    #[test]
    fn test_build_group_flattens_terms() {
        let query = QueryInput::Group(QueryGroup {
            operator: BooleanOperator::And,
            queries: vec![
                QueryInput::simple("maps"),
                QueryInput::Group(QueryGroup {
                    operator: BooleanOperator::Or,
                    queries: vec![QueryInput::simple(""), QueryInput::simple("atlas")],
                }),
            ],
        });

        let params = QueryBuilder::new().build(&query);
        assert_eq!(params.get_first("search"), Some("maps atlas"));
    }

    #[test]
    fn test_empty_query_yields_empty_search() {
        let params = QueryBuilder::new().build(&QueryInput::simple(""));
        assert_eq!(params.get_first("search"), Some(""));
    }
}
