use {super::*, boilerplate::Boilerplate, server_config::ServerConfig};

pub(crate) use {
  collection_card::CollectionCardHtml, dashboard::DashboardHtml, explore::ExploreHtml,
  pagination::PaginationHtml, snippet_card::SnippetCardHtml,
};

pub mod collection_card;
pub mod dashboard;
pub mod explore;
pub mod pagination;
mod snippet_card;

#[derive(Boilerplate)]
pub(crate) struct PageHtml<T: PageContent> {
  content: T,
  config: Arc<ServerConfig>,
  viewer: Option<Session>,
}

impl<T> PageHtml<T>
where
  T: PageContent,
{
  pub(crate) fn new(content: T, config: Arc<ServerConfig>, viewer: Option<Session>) -> Self {
    Self {
      content,
      config,
      viewer,
    }
  }
}

pub(crate) trait PageContent: Display + 'static {
  fn title(&self) -> String;

  fn page(self, config: Arc<ServerConfig>, viewer: Option<Session>) -> PageHtml<Self>
  where
    Self: Sized,
  {
    PageHtml::new(self, config, viewer)
  }

  fn notification(&self) -> Option<&Notification> {
    None
  }
}
