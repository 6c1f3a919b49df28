use {
  super::*,
  chrono::{DateTime, Utc},
};

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetSummary {
  pub id: String,
  pub title: String,
  #[serde(default)]
  pub description: Option<String>,
  pub content: String,
  #[serde(default)]
  pub language: Option<String>,
  #[serde(default)]
  pub author: Option<String>,
  pub created_at: DateTime<Utc>,
  #[serde(default)]
  pub is_snippet_owner: bool,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnippetData {
  pub snippets: Vec<SnippetSummary>,
  pub total_pages: u32,
  pub current_page: u32,
}

#[derive(Debug, PartialEq, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SnippetCount {
  pub snippets: u64,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionWithCount {
  pub id: String,
  pub title: String,
  #[serde(default)]
  pub description: Option<String>,
  #[serde(default)]
  pub is_private: bool,
  #[serde(rename = "_count", default)]
  pub count: SnippetCount,
}

impl CollectionWithCount {
  pub fn snippet_count(&self) -> u64 {
    self.count.snippets
  }
}

/// Partial update applied by the collection update endpoint.
#[derive(Debug, PartialEq, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionUpdate {
  pub title: String,
  pub description: String,
  pub is_private: bool,
}

impl From<&CollectionWithCount> for CollectionUpdate {
  fn from(collection: &CollectionWithCount) -> Self {
    Self {
      title: collection.title.clone(),
      description: collection.description.clone().unwrap_or_default(),
      is_private: collection.is_private,
    }
  }
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct SessionUser {
  pub id: String,
  #[serde(default)]
  pub name: Option<String>,
}

#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct Session {
  pub user: SessionUser,
}

impl Session {
  pub fn user_id(&self) -> &str {
    &self.user.id
  }

  pub fn display_name(&self) -> &str {
    self.user.name.as_deref().unwrap_or(&self.user.id)
  }
}

#[cfg(test)]
mod tests {
  use {super::*, crate::test::pretty_assert_eq, serde_json::json};

  #[test]
  fn collection_count_is_read_from_underscore_count() {
    let collection: CollectionWithCount = serde_json::from_value(json!({
      "id": "c1",
      "title": "Rust",
      "description": null,
      "isPrivate": true,
      "_count": { "snippets": 4 },
    }))
    .unwrap();

    pretty_assert_eq!(collection.snippet_count(), 4);
    assert!(collection.is_private);
    pretty_assert_eq!(collection.description, None);
  }

  #[test]
  fn update_serializes_with_camel_case_privacy_flag() {
    pretty_assert_eq!(
      serde_json::to_value(CollectionUpdate {
        title: "X".into(),
        description: String::new(),
        is_private: true,
      })
      .unwrap(),
      json!({ "title": "X", "description": "", "isPrivate": true }),
    );
  }

  #[test]
  fn update_prefills_missing_description_with_empty_string() {
    let collection = CollectionWithCount {
      id: "c1".into(),
      title: "Shell".into(),
      description: None,
      is_private: false,
      count: SnippetCount { snippets: 0 },
    };

    pretty_assert_eq!(
      CollectionUpdate::from(&collection),
      CollectionUpdate {
        title: "Shell".into(),
        description: String::new(),
        is_private: false,
      }
    );
  }

  #[test]
  fn snippet_data_uses_camel_case_pagination_fields() {
    let data: SnippetData = serde_json::from_value(json!({
      "snippets": [{
        "id": "s1",
        "title": "hello",
        "content": "fn main() {}",
        "createdAt": "2024-01-01T00:00:00Z",
        "isSnippetOwner": true,
      }],
      "totalPages": 3,
      "currentPage": 2,
    }))
    .unwrap();

    pretty_assert_eq!(data.total_pages, 3);
    pretty_assert_eq!(data.current_page, 2);
    assert!(data.snippets[0].is_snippet_owner);
    pretty_assert_eq!(data.snippets[0].language, None);
  }

  #[test]
  fn session_display_name_falls_back_to_id() {
    let session = Session {
      user: SessionUser {
        id: "u1".into(),
        name: None,
      },
    };

    pretty_assert_eq!(session.display_name(), "u1");
  }
}
