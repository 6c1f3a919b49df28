use super::*;

#[derive(Boilerplate)]
pub(crate) struct DashboardHtml {
  pub(crate) cards: Vec<CollectionCardHtml>,
  pub(crate) notification: Option<Notification>,
}

impl DashboardHtml {
  pub(crate) fn new(collections: Vec<CollectionWithCount>, active: Option<&str>) -> Self {
    Self {
      cards: collections
        .into_iter()
        .map(|collection| {
          let active = active == Some(collection.id.as_str());
          CollectionCardHtml::new(collection, active, true)
        })
        .collect(),
      notification: None,
    }
  }

  pub(crate) fn active_card(&mut self) -> Option<&mut CollectionCardHtml> {
    self.cards.iter_mut().find(|card| card.active)
  }
}

impl PageContent for DashboardHtml {
  fn title(&self) -> String {
    "Dashboard".into()
  }

  fn notification(&self) -> Option<&Notification> {
    self.notification.as_ref()
  }
}
