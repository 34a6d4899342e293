use crate::view::Section;

pub const USERNAME_STORAGE_KEY: &str = "lastfm_explorer_username";

pub fn render_index(default_user: Option<&str>) -> String {
    let nav: String = Section::ALL
        .iter()
        .map(|section| {
            format!(
                r##"<a href="#" class="nav-link" data-section="{}">{}</a>"##,
                section.id(),
                htmlescape::encode_minimal(section.title())
            )
        })
        .collect();

    INDEX_HTML
        .replace("{{NAV}}", &nav)
        .replace("{{STORAGE_KEY}}", USERNAME_STORAGE_KEY)
        .replace(
            "{{DEFAULT_USER}}",
            &htmlescape::encode_attribute(default_user.unwrap_or_default()),
        )
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Last.fm Explorer</title>
  <link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css" />
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&display=swap');

    :root {
      --bg: #0f0f17;
      --panel: #1a1a26;
      --panel-2: #232334;
      --ink: #ececf1;
      --muted: #8c8ca1;
      --accent: #d51007;
      --accent-2: #ff4f45;
      --shadow: 0 18px 40px rgba(0, 0, 0, 0.35);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      grid-template-columns: 240px 1fr;
    }

    aside {
      background: var(--panel);
      padding: 24px 16px;
      display: flex;
      flex-direction: column;
      gap: 18px;
      position: sticky;
      top: 0;
      height: 100vh;
      overflow-y: auto;
    }

    .brand {
      font-size: 1.3rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .nav-link {
      display: block;
      padding: 8px 12px;
      border-radius: 10px;
      color: var(--muted);
      text-decoration: none;
    }

    .nav-link.active,
    .nav-link:hover {
      background: var(--panel-2);
      color: var(--ink);
    }

    .user-box {
      display: grid;
      gap: 6px;
      font-size: 0.9rem;
      color: var(--muted);
    }

    #nowPlaying {
      font-size: 0.85rem;
      color: var(--muted);
      min-height: 1.2em;
    }

    #nowPlaying.active {
      color: var(--accent-2);
    }

    main {
      padding: 32px;
      display: grid;
      gap: 24px;
      align-content: start;
      animation: rise 400ms ease;
    }

    .page-title {
      margin: 0;
      font-size: 2rem;
    }

    .page-subtitle {
      margin: 4px 0 0;
      color: var(--muted);
    }

    .card,
    .user-profile,
    .stat-card,
    .api-docs {
      background: var(--panel);
      border-radius: 18px;
      padding: 18px;
      box-shadow: var(--shadow);
    }

    .card-title {
      margin: 0 0 12px;
      font-size: 1.1rem;
    }

    .stats-grid,
    .data-grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(220px, 1fr));
      gap: 16px;
      margin-bottom: 16px;
    }

    .stat-value {
      font-size: 1.6rem;
      font-weight: 600;
    }

    .stat-label,
    .item-artist,
    .item-stat,
    .detail-label,
    .user-meta-label {
      color: var(--muted);
      font-size: 0.85rem;
    }

    .item-list.scrollable {
      max-height: 70vh;
      overflow-y: auto;
    }

    .item-card {
      display: flex;
      gap: 12px;
      padding: 8px;
      border-radius: 12px;
      align-items: center;
    }

    .item-card.now-playing {
      background: rgba(213, 16, 7, 0.15);
    }

    .item-image img,
    .item-placeholder {
      width: 56px;
      height: 56px;
      border-radius: 8px;
      object-fit: cover;
      display: grid;
      place-items: center;
      background: var(--panel-2);
    }

    .item-rank,
    .now-playing-badge {
      font-size: 0.75rem;
      color: var(--accent-2);
    }

    .item-stats {
      display: flex;
      gap: 12px;
    }

    .user-profile {
      display: flex;
      gap: 24px;
      align-items: center;
      margin-bottom: 16px;
    }

    .user-avatar img {
      width: 120px;
      height: 120px;
      border-radius: 50%;
    }

    .user-meta {
      display: flex;
      gap: 24px;
    }

    .details-grid {
      display: grid;
      gap: 10px;
    }

    .detail-item {
      display: flex;
      justify-content: space-between;
    }

    .detail-link {
      color: var(--accent-2);
    }

    .search-box,
    .period-filter {
      display: flex;
      gap: 12px;
      margin-bottom: 16px;
    }

    .search-input-wrapper {
      flex: 1;
      position: relative;
    }

    .search-icon {
      position: absolute;
      left: 14px;
      top: 50%;
      transform: translateY(-50%);
      color: var(--muted);
    }

    input,
    select {
      width: 100%;
      padding: 12px 14px 12px 40px;
      border-radius: 12px;
      border: 1px solid var(--panel-2);
      background: var(--panel);
      color: var(--ink);
      font: inherit;
    }

    select {
      width: auto;
      padding-left: 14px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 12px;
      padding: 12px 18px;
      font: inherit;
      font-weight: 600;
      cursor: pointer;
      background: var(--accent);
      color: white;
    }

    .tags-cloud {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    .tag-item {
      padding: 6px 12px;
      border-radius: 999px;
      background: var(--panel-2);
      cursor: pointer;
    }

    .tag-item:hover {
      background: var(--accent);
    }

    .loading-state,
    .error-state,
    .empty-state,
    .username-prompt {
      text-align: center;
      padding: 48px 16px;
      color: var(--muted);
    }

    .error-state i {
      color: var(--accent-2);
      font-size: 2rem;
    }

    .api-docs-toggle {
      width: 100%;
      display: flex;
      justify-content: space-between;
      background: var(--panel-2);
    }

    .api-docs-content {
      display: none;
      padding-top: 12px;
    }

    .api-docs.open .api-docs-content {
      display: block;
    }

    .code-block {
      background: var(--bg);
      border-radius: 10px;
      padding: 12px;
      overflow-x: auto;
    }

    .params-table {
      width: 100%;
      border-collapse: collapse;
    }

    .params-table td,
    .params-table th {
      padding: 6px;
      text-align: left;
    }

    .param-required {
      color: var(--accent-2);
    }

    .modal {
      position: fixed;
      inset: 0;
      background: rgba(0, 0, 0, 0.7);
      display: none;
      place-items: center;
    }

    .modal.open {
      display: grid;
    }

    .modal form {
      background: var(--panel);
      padding: 28px;
      border-radius: 18px;
      display: grid;
      gap: 12px;
      width: min(380px, 90vw);
    }

    .modal input {
      padding-left: 14px;
    }

    .status[data-type="error"] {
      color: var(--accent-2);
      min-height: 1.2em;
    }

    @keyframes rise {
      from {
        opacity: 0;
        transform: translateY(18px);
      }
      to {
        opacity: 1;
        transform: translateY(0);
      }
    }

    @media (max-width: 760px) {
      body {
        grid-template-columns: 1fr;
      }
      aside {
        position: static;
        height: auto;
      }
    }
  </style>
</head>
<body data-default-user="{{DEFAULT_USER}}">
  <aside>
    <div class="brand"><i class="fab fa-lastfm"></i> Last.fm Explorer</div>
    <div class="user-box">
      <span>Signed in as <strong id="currentUser">-</strong></span>
      <a href="#" id="changeUser" class="nav-link">Change user</a>
      <div id="nowPlaying"></div>
    </div>
    <nav>{{NAV}}</nav>
  </aside>

  <main id="content"></main>

  <div id="usernameModal" class="modal">
    <form id="usernameForm">
      <h2>Enter your Last.fm username</h2>
      <input id="usernameInput" type="text" autocomplete="off" placeholder="Username" />
      <p id="usernameStatus" class="status" data-type="error"></p>
      <button type="submit">Continue</button>
    </form>
  </div>

  <script>
    const STORAGE_KEY = '{{STORAGE_KEY}}';
    const content = document.getElementById('content');
    const modal = document.getElementById('usernameModal');
    const usernameInput = document.getElementById('usernameInput');
    const usernameStatus = document.getElementById('usernameStatus');
    const indicator = document.getElementById('nowPlaying');

    let user = localStorage.getItem(STORAGE_KEY) || document.body.dataset.defaultUser || '';
    let current = { section: 'dashboard', params: {} };
    let generation = 0;

    function promptUsername() {
      usernameInput.value = user;
      usernameStatus.textContent = '';
      modal.classList.add('open');
      usernameInput.focus();
    }

    async function setUser(name) {
      const query = new URLSearchParams({ user: name, current: user, section: current.section, ...current.params });
      const mine = ++generation;
      const response = await fetch(`/view/user?${query}`);
      const change = await response.json();
      if (change.status === 'rejected') {
        usernameStatus.textContent = change.message;
        return;
      }
      modal.classList.remove('open');
      if (change.status === 'unchanged') {
        if (content.childElementCount === 0) {
          loadSection(current.section, current.params);
        }
        return;
      }
      user = change.user;
      localStorage.setItem(STORAGE_KEY, user);
      document.getElementById('currentUser').textContent = user;
      if (change.section !== current.section) {
        current = { section: change.section, params: {} };
      }
      if (mine !== generation) {
        return;
      }
      markActive(current.section);
      content.innerHTML = change.html;
      hoistNowPlaying();
      wire();
    }

    async function fetchFragment(url) {
      const response = await fetch(url);
      return response.text();
    }

    async function loadSection(section, params = {}) {
      if (!user) {
        promptUsername();
        return;
      }
      current = { section, params };
      const mine = ++generation;
      markActive(section);
      content.innerHTML = '<div class="loading-state"><i class="fas fa-spinner fa-spin"></i><p>Loading...</p></div>';

      const query = new URLSearchParams({ user, ...params });
      const html = await fetchFragment(`/view/section/${section}?${query}`);
      if (mine !== generation) {
        return;
      }
      content.innerHTML = html;
      hoistNowPlaying();
      wire();
    }

    function markActive(section) {
      document.querySelectorAll('.nav-link[data-section]').forEach((link) => {
        link.classList.toggle('active', link.dataset.section === section);
      });
    }

    function hoistNowPlaying() {
      const update = content.querySelector('template.now-playing-update');
      if (!update) {
        return;
      }
      indicator.innerHTML = update.innerHTML;
      indicator.classList.toggle('active', update.dataset.active === 'true');
    }

    async function fillResults(targetId, url) {
      const target = document.getElementById(targetId);
      if (!target) {
        return;
      }
      target.innerHTML = '<div class="loading-state"><i class="fas fa-spinner fa-spin"></i></div>';
      target.innerHTML = await fetchFragment(url);
    }

    function bindInput(inputId, buttonId, run) {
      const input = document.getElementById(inputId);
      const button = document.getElementById(buttonId);
      if (!input || !button) {
        return;
      }
      const submit = () => {
        const value = input.value.trim();
        if (value) {
          run(value);
        }
      };
      button.addEventListener('click', submit);
      input.addEventListener('keypress', (event) => {
        if (event.key === 'Enter') {
          submit();
        }
      });
    }

    function wire() {
      const period = document.getElementById('periodFilter');
      if (period) {
        period.addEventListener('change', () => {
          loadSection(period.dataset.section, { period: period.value });
        });
      }

      const results = document.getElementById('searchResults');
      if (results) {
        const kind = results.dataset.kind;
        bindInput(`${kind}SearchInput`, `${kind}SearchBtn`, (term) => {
          fillResults('searchResults', `/view/search/${kind}?q=${encodeURIComponent(term)}`);
        });
      }

      bindInput('countryInput', 'geoSearchBtn', (country) => {
        fillResults('geoResults', `/view/geo?country=${encodeURIComponent(country)}`);
      });
      bindInput('tagInput', 'tagSearchBtn', (tag) => {
        fillResults('tagResults', `/view/tag?tag=${encodeURIComponent(tag)}`);
      });
    }

    document.querySelectorAll('.nav-link[data-section]').forEach((link) => {
      link.addEventListener('click', (event) => {
        event.preventDefault();
        loadSection(link.dataset.section);
      });
    });

    content.addEventListener('click', (event) => {
      const chip = event.target.closest('.tag-item');
      if (chip) {
        loadSection('tag-explore', { tag: chip.dataset.tag });
        return;
      }
      const toggle = event.target.closest('.api-docs-toggle');
      if (toggle) {
        toggle.parentElement.classList.toggle('open');
      }
    });

    document.getElementById('changeUser').addEventListener('click', (event) => {
      event.preventDefault();
      promptUsername();
    });

    document.getElementById('usernameForm').addEventListener('submit', (event) => {
      event.preventDefault();
      setUser(usernameInput.value);
    });

    if (user) {
      document.getElementById('currentUser').textContent = user;
      loadSection('dashboard');
    } else {
      promptUsername();
    }
  </script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_user_is_injected_escaped() {
        let html = render_index(Some(r#"rj"><script>"#));
        assert!(!html.contains(r#"rj"><script>"#));
        assert!(html.contains(r#"data-default-user="rj&"#));
    }

    #[test]
    fn nav_lists_every_section() {
        let html = render_index(None);
        for section in Section::ALL {
            assert!(html.contains(&format!(r#"data-section="{}""#, section.id())));
        }
        assert!(html.contains(r#"data-default-user="""#));
        assert!(html.contains("lastfm_explorer_username"));
        assert!(!html.contains("{{"));
        assert!(html.contains("/view/user?"));
    }
}
