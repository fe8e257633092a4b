use crate::controller::ClientSettings;

pub fn render_index(settings: &ClientSettings) -> String {
    let settings = serde_json::to_string(settings)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/");
    INDEX_HTML.replace("{{SETTINGS}}", &settings)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Good Dogs</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #f5d3a7;
      --ink: #2b2a28;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --card: rgba(255, 255, 255, 0.86);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #ffe9d4 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(640px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 24px;
      text-align: center;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.8rem);
      margin: 0;
    }

    .subtitle {
      margin: 6px 0 0;
      color: #5f5c57;
    }

    .photo {
      background: white;
      border-radius: 20px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      padding: 12px;
      min-height: 320px;
      display: grid;
      place-items: center;
    }

    #dog-image {
      max-width: 100%;
      max-height: 420px;
      border-radius: 14px;
      object-fit: cover;
    }

    .actions {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(200px, 1fr));
      gap: 16px;
    }

    button {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 16px 20px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      color: white;
      transition: transform 150ms ease;
    }

    button:active {
      transform: scale(0.98);
    }

    .btn-good {
      background: var(--accent);
    }

    .btn-bad {
      background: var(--accent-2);
    }

    .popup-overlay {
      position: fixed;
      inset: 0;
      background: rgba(43, 42, 40, 0.55);
      display: none;
      place-items: center;
      padding: 18px;
    }

    .popup-overlay.show {
      display: grid;
    }

    .popup {
      background: white;
      border-radius: 22px;
      padding: 28px;
      max-width: 420px;
      display: grid;
      gap: 18px;
      box-shadow: var(--shadow);
    }

    #popup-message {
      margin: 0;
      font-size: 1.15rem;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Good Dogs</h1>
      <p class="subtitle">Is this a good dog?</p>
    </header>

    <section class="photo">
      <img id="dog-image" alt="A random dog" />
    </section>

    <section class="actions">
      <button class="btn-good" id="good-dog-btn" type="button">Good Dog</button>
      <button class="btn-bad" id="bad-dog-btn" type="button">Bad Dog</button>
    </section>
  </main>

  <div class="popup-overlay" id="popup-overlay" role="dialog" aria-modal="true">
    <div class="popup">
      <p id="popup-message"></p>
      <button class="btn-bad" id="close-popup" type="button">Next dog</button>
    </div>
  </div>

  <script>
    const settings = {{SETTINGS}};

    const dogImage = document.getElementById('dog-image');
    const overlayEl = document.getElementById('popup-overlay');
    const messageEl = document.getElementById('popup-message');
    const closeBtn = document.getElementById('close-popup');

    // Rows come from the server's popup controller, keyed by state and event.
    const rows = new Map(settings.transitions.map((row) => [`${row.from}|${row.event}`, row]));
    let state = { name: 'idle', message: '' };

    const render = () => {
      const shown = state.name === 'shown';
      messageEl.textContent = state.message;
      overlayEl.classList.toggle('show', shown);
      if (shown) {
        closeBtn.focus();
      }
    };

    let prefetched = null;

    const prefetchNext = () => {
      prefetched = fetch(`/api/random-dog?t=${Date.now()}`)
        .then((res) => {
          const img = new Image();
          img.src = res.url;
          return res.url;
        })
        .catch(() => null);
    };

    const loadNextDog = async () => {
      const url = prefetched ? await prefetched : null;
      dogImage.src = url || `/api/random-dog?t=${Date.now()}`;
      prefetchNext();
    };

    const submitVote = (vote) =>
      fetch('/api/vote', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ vote, timestamp: new Date().toISOString() })
      }).then((res) => {
        if (!res.ok) {
          throw new Error(`vote failed with status ${res.status}`);
        }
      });

    const dispatch = (event) => {
      const row = rows.get(`${state.name}|${event}`);
      if (!row) {
        return;
      }
      let message = state.message;
      row.effects.forEach((effect) => {
        switch (effect.type) {
          case 'submit-vote':
            submitVote(effect.value).catch((err) => {
              console.error('failed to record vote', err);
              dispatch('vote-failed');
            });
            break;
          case 'show-popup':
            message = effect.value;
            break;
          case 'hide-popup':
            message = '';
            break;
          case 'load-next-image':
            loadNextDog();
            break;
          case 'log-failure':
            console.warn('vote was not recorded');
            break;
        }
      });
      state = { name: row.to, message };
      render();
    };

    document.getElementById('good-dog-btn').addEventListener('click', () => dispatch('vote-good'));
    document.getElementById('bad-dog-btn').addEventListener('click', () => dispatch('vote-bad'));
    closeBtn.addEventListener('click', () => dispatch('close-button'));
    overlayEl.addEventListener('click', (event) => {
      if (event.target === overlayEl) {
        dispatch('close-overlay');
      }
    });
    document.addEventListener('keydown', (event) => {
      if (event.key === 'Escape') {
        dispatch('close-escape');
      }
    });

    loadNextDog();
  </script>
</body>
</html>
"#;
