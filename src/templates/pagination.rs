use {super::*, query::QueryParams};

#[derive(Debug, PartialEq, Clone, Copy)]
pub(crate) enum ControlKind {
  Backward,
  Number,
  Forward,
}

#[derive(Debug, PartialEq, Clone)]
pub(crate) struct PageControl {
  pub(crate) kind: ControlKind,
  pub(crate) page: u32,
  pub(crate) active: bool,
  /// Navigation target; `None` for the active page, which is not a link.
  pub(crate) href: Option<String>,
}

impl PageControl {
  fn new(kind: ControlKind, page: u32, current_page: u32, path: &str, params: &QueryParams) -> Self {
    let active = kind == ControlKind::Number && page == current_page;

    Self {
      kind,
      page,
      active,
      href: (!active).then(|| format!("{path}?{}", params.with("page", &page.to_string()))),
    }
  }

  pub(crate) fn class(&self) -> &'static str {
    match (self.kind, self.active) {
      (ControlKind::Backward, _) => "page prev",
      (ControlKind::Forward, _) => "page next",
      (ControlKind::Number, true) => "page number active",
      (ControlKind::Number, false) => "page number",
    }
  }

  pub(crate) fn label(&self) -> String {
    match self.kind {
      ControlKind::Backward => "‹".into(),
      ControlKind::Forward => "›".into(),
      ControlKind::Number => self.page.to_string(),
    }
  }

  pub(crate) fn aria_label(&self) -> String {
    match self.kind {
      ControlKind::Backward => "Previous page".into(),
      ControlKind::Forward => "Next page".into(),
      ControlKind::Number => format!("Page {}", self.page),
    }
  }
}

#[derive(Boilerplate, Debug, PartialEq)]
pub(crate) struct PaginationHtml {
  pub(crate) controls: Vec<PageControl>,
}

impl PaginationHtml {
  /// Navigation for `current_page` of `total_pages`, linking to `path` with
  /// `params` and an updated `page`. There is nothing to navigate below two
  /// pages.
  pub(crate) fn new(
    total_pages: u32,
    current_page: u32,
    path: &str,
    params: &QueryParams,
  ) -> Option<Self> {
    if total_pages < 2 {
      return None;
    }

    let current_page = current_page.clamp(1, total_pages);

    let control = |kind, page| PageControl::new(kind, page, current_page, path, params);

    let mut controls = Vec::new();

    if current_page != 1 {
      controls.push(control(ControlKind::Backward, current_page - 1));
    }

    controls.extend((1..=total_pages).map(|page| control(ControlKind::Number, page)));

    if current_page != total_pages {
      controls.push(control(ControlKind::Forward, current_page + 1));
    }

    Some(Self { controls })
  }
}
