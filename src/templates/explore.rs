use {super::*, query::QueryParams};

#[derive(Boilerplate)]
pub(crate) struct ExploreHtml {
  pub(crate) snippets: Vec<SnippetCardHtml>,
  pub(crate) search: Option<String>,
  pub(crate) pagination: Option<PaginationHtml>,
}

impl ExploreHtml {
  pub(crate) fn new(
    data: SnippetData,
    search: Option<String>,
    path: &str,
    params: &QueryParams,
  ) -> Self {
    Self {
      pagination: PaginationHtml::new(data.total_pages, data.current_page, path, params),
      snippets: data
        .snippets
        .into_iter()
        .map(|snippet| SnippetCardHtml {
          snippet,
          is_public: true,
        })
        .collect(),
      search,
    }
  }
}

impl PageContent for ExploreHtml {
  fn title(&self) -> String {
    "Explore SnipShare".into()
  }
}
