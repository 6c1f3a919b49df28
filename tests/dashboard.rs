use super::*;

fn service() -> test_snippet_service::Builder {
  test_snippet_service::builder()
    .collection(Collection {
      description: Some("Shell helpers".into()),
      snippets: 3,
      ..Collection::new("c1", "ada", "Scripts")
    })
    .collection(Collection {
      is_private: true,
      snippets: 1,
      ..Collection::new("c2", "ada", "Drafts")
    })
    .collection(Collection::new("c3", "grace", "Compilers"))
    .session("ada-token", User::new("ada", "Ada"))
}

fn update_form<'a>(title: &'a str, description: &'a str, private: bool) -> Vec<(&'a str, &'a str)> {
  let mut form = vec![("title", title), ("description", description)];
  if private {
    form.push(("is_private", "on"));
  }
  form
}

#[test]
fn anonymous_viewers_are_redirected_home() {
  let server = TestServer::spawn(service().build());

  let response = server.get("/dashboard");

  pretty_assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
  pretty_assert_eq!(response.headers()["location"], "/");
  assert!(server.service().requests().is_empty());
}

#[test]
fn lists_the_viewers_collections() {
  let server = TestServer::spawn(service().build());

  let response = server.get_as("/dashboard", "ada-token");

  pretty_assert_eq!(response.status(), StatusCode::OK);

  let body = response.text().unwrap();

  assert_regex_match!(
    body,
    concat!(
      r".*<title>Dashboard</title>.*<h1>Collections</h1>.*",
      r#"<article class="collection-card">.*<a href="/dashboard\?collection=c1">Scripts</a>.*<p>Shell helpers</p>\s*<p class=count>3 snippets</p>.*"#,
      r#"<span class=lock title=Private>.*<a href="/dashboard\?collection=c2">Drafts</a>.*<p class=count>1 snippet</p>.*"#,
    ),
  );
  pretty_assert_eq!(count_matches(&body, "Compilers"), 0);
  pretty_assert_eq!(count_matches(&body, "Edit collection"), 0);
  pretty_assert_eq!(
    server.service().requests(),
    ["/api/collections?user=ada".to_string()]
  );
}

#[test]
fn viewer_without_collections() {
  let server = TestServer::spawn(
    test_snippet_service::builder()
      .session("t", User::new("nobody", "Nobody"))
      .build(),
  );

  assert_regex_match!(
    server.get_as("/dashboard", "t").text().unwrap(),
    ".*<p class=empty>No collections yet.</p>.*",
  );
}

#[test]
fn selected_collection_offers_editing() {
  let server = TestServer::spawn(service().build());

  let body = server
    .get_as("/dashboard?collection=c1", "ada-token")
    .text()
    .unwrap();

  assert_regex_match!(
    body,
    r#".*<article class="collection-card active">.*<a class=edit href="/dashboard\?collection=c1&amp;edit=true" aria-label="Edit collection">.*"#,
  );
  pretty_assert_eq!(count_matches(&body, "Edit collection"), 1);
  pretty_assert_eq!(count_matches(&body, "<dialog"), 0);
}

#[test]
fn editor_is_prefilled() {
  let server = TestServer::spawn(service().build());

  let body = server
    .get_as("/dashboard?collection=c2&edit=true", "ada-token")
    .text()
    .unwrap();

  assert_regex_match!(
    body,
    concat!(
      r#".*<dialog class=modal open>.*<h2>Update collection</h2>.*"#,
      r#"<form method=post action="/dashboard/collection\?id=c2">.*"#,
      r#"<input name=title value="Drafts" required>.*"#,
      r#"<textarea name=description></textarea>.*"#,
      r#"<input type=checkbox name=is_private checked>.*"#,
      r#"<button type=submit>Update</button>.*"#,
    ),
  );
  pretty_assert_eq!(count_matches(&body, "<dialog"), 1);
}

#[test]
fn successful_update() {
  let server = TestServer::spawn(service().build());

  let response = server.post_form_as(
    "/dashboard/collection?id=c1",
    "ada-token",
    &update_form("Shell", "One-liners", true),
  );

  pretty_assert_eq!(response.status(), StatusCode::OK);

  let body = response.text().unwrap();

  pretty_assert_eq!(count_matches(&body, "class=\"toast"), 1);
  assert_regex_match!(
    body,
    r#".*<div class="toast success" role=status>collection updated.</div>.*"#,
  );
  pretty_assert_eq!(count_matches(&body, "<dialog"), 0);
  assert_regex_match!(
    body,
    r#".*<article class="collection-card active">.*<span class=lock title=Private>.*<a href="/dashboard\?collection=c1">Shell</a>\s*</h3>\s*<p>One-liners</p>.*"#,
  );

  pretty_assert_eq!(
    server.service().updates(),
    [test_snippet_service::Update {
      id: "c1".into(),
      user: "ada".into(),
      title: "Shell".into(),
      description: "One-liners".into(),
      is_private: true,
    }]
  );
  pretty_assert_eq!(
    server.service().collection("c1").unwrap().title,
    "Shell"
  );
}

#[test]
fn failed_update_keeps_the_editor_open() {
  let server = TestServer::spawn(service().build());

  server.service().fail_updates(500);

  let response = server.post_form_as(
    "/dashboard/collection?id=c1",
    "ada-token",
    &update_form("X", "", false),
  );

  pretty_assert_eq!(response.status(), StatusCode::OK);

  let body = response.text().unwrap();

  pretty_assert_eq!(count_matches(&body, "class=\"toast"), 1);
  assert_regex_match!(
    body,
    r#".*<div class="toast error" role=status>Failed to update collection</div>.*"#,
  );
  assert_regex_match!(
    body,
    concat!(
      r#".*<a href="/dashboard\?collection=c1">Scripts</a>.*"#,
      r#"<dialog class=modal open>.*"#,
      r#"<input name=title value="X" required>.*"#,
      r#"<textarea name=description></textarea>.*"#,
      r#"<input type=checkbox name=is_private> Private.*"#,
      r#"<button type=submit>Update</button>.*"#,
    ),
  );
  pretty_assert_eq!(count_matches(&body, "disabled"), 0);
  pretty_assert_eq!(
    server.service().collection("c1").unwrap().title,
    "Scripts"
  );
}

#[test]
fn timed_out_update_keeps_the_editor_open() {
  let server =
    TestServer::spawn_with_server_args(service().build(), &["--request-timeout", "500ms"]);

  server.service().stall_updates();

  let response = server.post_form_as(
    "/dashboard/collection?id=c1",
    "ada-token",
    &update_form("Slow", "still waiting", true),
  );

  pretty_assert_eq!(response.status(), StatusCode::OK);

  let body = response.text().unwrap();

  pretty_assert_eq!(count_matches(&body, "class=\"toast"), 1);
  assert_regex_match!(
    body,
    r#".*<div class="toast error" role=status>Failed to update collection</div>.*"#,
  );
  assert_regex_match!(
    body,
    concat!(
      r#".*<a href="/dashboard\?collection=c1">Scripts</a>.*"#,
      r#"<dialog class=modal open>.*"#,
      r#"<input name=title value="Slow" required>.*"#,
      r#"<textarea name=description>still waiting</textarea>.*"#,
      r#"<input type=checkbox name=is_private checked> Private.*"#,
      r#"<button type=submit>Update</button>.*"#,
    ),
  );
  pretty_assert_eq!(count_matches(&body, "<dialog"), 1);
  pretty_assert_eq!(count_matches(&body, "disabled"), 0);
  assert!(server.service().updates().is_empty());
}

#[test]
fn updating_anothers_collection_is_not_found() {
  let server = TestServer::spawn(service().build());

  let response = server.post_form_as(
    "/dashboard/collection?id=c3",
    "ada-token",
    &update_form("Mine now", "", false),
  );

  pretty_assert_eq!(response.status(), StatusCode::NOT_FOUND);
  assert!(server.service().updates().is_empty());
  pretty_assert_eq!(
    server.service().requests(),
    ["/api/collections?user=ada".to_string()]
  );
}

#[test]
fn anonymous_updates_are_redirected_home() {
  let server = TestServer::spawn(service().build());

  let response = server.post_form_as(
    "/dashboard/collection?id=c1",
    "stale-token",
    &update_form("X", "", false),
  );

  pretty_assert_eq!(response.status(), StatusCode::SEE_OTHER);
  pretty_assert_eq!(response.headers()["location"], "/");
  assert!(server.service().updates().is_empty());
}

#[test]
fn unavailable_data_service_is_a_bad_gateway() {
  let server = TestServer::spawn(service().build());

  server.service().set_unavailable();

  pretty_assert_eq!(
    server.get_as("/dashboard", "ada-token").status(),
    StatusCode::BAD_GATEWAY
  );
}
