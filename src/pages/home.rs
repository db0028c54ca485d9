use actix_web::{get, http::header::ContentType, web::Data, HttpResponse};

use crate::*;

#[get("/")]
pub async fn home(store: Data<ConfigStore>) -> HttpResponse {
    let path = escape(&store.path().display().to_string());

    let html = format!(
        r#"<!doctype html>
<html lang="en">
  <head>
    <meta charset="UTF-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1.0" />
    <title>Tunnel Editor</title>
    <link rel="stylesheet" href="/static/css/editor.css" />
  </head>
  <body>
    <div class="fullpage">
      <h1 id="title">Tunnels</h1>
      <p id="subhead">Editing <code>{path}</code>. The previous version is backed up on every save.</p>
      <table id="tunnelTable">
        <thead>
          <tr>
            <th>Name</th>
            <th>Remote host</th>
            <th>Remote port</th>
            <th>Local port</th>
            <th>Direction</th>
            <th>Status</th>
            <th></th>
          </tr>
        </thead>
        <tbody></tbody>
      </table>
      <div id="actions">
        <button id="addRow">Add tunnel</button>
        <button id="saveConfig">Save</button>
      </div>
      <p id="message"></p>
    </div>
  </body>
  <script src="/static/script/editor.js"></script>
</html>"#
    );

    HttpResponse::Ok()
        .content_type(ContentType::html())
        .body(html)
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
