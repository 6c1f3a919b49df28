use super::*;

#[derive(Boilerplate)]
pub(crate) struct SnippetCardHtml {
  pub(crate) snippet: SnippetSummary,
  pub(crate) is_public: bool,
}

#[cfg(test)]
mod tests {
  use {super::*, chrono::TimeZone};

  fn card(is_snippet_owner: bool, is_public: bool) -> SnippetCardHtml {
    SnippetCardHtml {
      snippet: SnippetSummary {
        id: "s1".into(),
        title: "Vec<T> tricks".into(),
        description: Some("collecting".into()),
        content: "let v: Vec<u8> = Vec::new();".into(),
        language: Some("rust".into()),
        author: Some("ada".into()),
        created_at: chrono::Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap(),
        is_snippet_owner,
      },
      is_public,
    }
  }

  #[test]
  fn content_is_escaped() {
    assert_regex_match!(
      card(false, true),
      ".*<h2>Vec&lt;T&gt; tricks</h2>.*<pre><code>let v: Vec&lt;u8&gt; = Vec::new\\(\\);</code></pre>.*",
    );
  }

  #[test]
  fn owner_badge() {
    assert_regex_match!(card(true, true), ".*<span class=owner>yours</span>.*");
    assert_regex_no_match!(card(false, true), "class=owner");
  }

  #[test]
  fn author_only_on_public_cards() {
    assert_regex_match!(card(false, true), ".*<span class=author>ada</span>.*");
    assert_regex_no_match!(card(false, false), "class=author");
  }

  #[test]
  fn creation_date() {
    assert_regex_match!(card(false, true), ".*<time datetime=2024-03-09T12:00:00\\+00:00>2024-03-09</time>.*");
  }
}
