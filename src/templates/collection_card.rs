use {super::*, url::form_urlencoded};

#[derive(Boilerplate, Debug)]
pub(crate) struct CollectionCardHtml {
  pub(crate) collection: CollectionWithCount,
  pub(crate) active: bool,
  pub(crate) show_edit: bool,
  pub(crate) modal: Modal,
}

impl CollectionCardHtml {
  pub(crate) fn new(collection: CollectionWithCount, active: bool, show_edit: bool) -> Self {
    Self {
      collection,
      active,
      show_edit,
      modal: Modal::Closed,
    }
  }

  pub(crate) fn can_edit(&self) -> bool {
    self.show_edit && self.active
  }

  pub(crate) fn open_editor(&mut self) -> Result {
    if !self.can_edit() {
      bail!("collection {} is not editable", self.collection.id);
    }

    let values = CollectionUpdate::from(&self.collection);
    self.modal = mem::take(&mut self.modal).open(values)?;

    Ok(())
  }

  pub(crate) fn submit(&mut self, values: CollectionUpdate) -> Result {
    self.open_editor()?;
    self.modal = mem::take(&mut self.modal).submit(values)?;
    Ok(())
  }

  pub(crate) fn resolve<E: Display>(&mut self, outcome: &Result<(), E>) -> Result<Notification> {
    let (modal, notification) = mem::take(&mut self.modal).resolve(outcome)?;
    self.modal = modal;
    Ok(notification)
  }

  /// Shows `values` as the stored state of the collection.
  pub(crate) fn apply(&mut self, values: &CollectionUpdate) {
    self.collection.title = values.title.clone();
    self.collection.description = Some(values.description.clone());
    self.collection.is_private = values.is_private;
  }

  fn id_query(&self) -> String {
    form_urlencoded::byte_serialize(self.collection.id.as_bytes()).collect()
  }

  pub(crate) fn select_href(&self) -> String {
    format!("/dashboard?collection={}", self.id_query())
  }

  pub(crate) fn edit_href(&self) -> String {
    format!("/dashboard?collection={}&edit=true", self.id_query())
  }

  pub(crate) fn action(&self) -> String {
    format!("/dashboard/collection?id={}", self.id_query())
  }

  pub(crate) fn class(&self) -> &'static str {
    if self.active {
      "collection-card active"
    } else {
      "collection-card"
    }
  }

  fn description(&self) -> Option<&str> {
    self
      .collection
      .description
      .as_deref()
      .filter(|description| !description.is_empty())
  }

  pub(crate) fn snippet_count(&self) -> String {
    match self.collection.snippet_count() {
      1 => "1 snippet".into(),
      n => format!("{n} snippets"),
    }
  }
}

fn checked(value: bool) -> &'static str {
  if value {
    " checked"
  } else {
    ""
  }
}

fn disabled(value: bool) -> &'static str {
  if value {
    " disabled"
  } else {
    ""
  }
}
