use axum::response::Html;

/// GET /
/// Single-page form driving the JSON API.
pub async fn index_handler() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Prompt Generator</title>
  <style>
    * { box-sizing: border-box; }
    body { margin: 0; display: flex; font-family: system-ui, sans-serif; color: #1d1f23; }
    aside { width: 320px; min-height: 100vh; padding: 16px; background: #f2f3f5; border-right: 1px solid #d8dbe0; }
    main { flex: 1; padding: 16px 24px; }
    label { display: block; margin-top: 10px; font-size: 13px; color: #555a63; }
    input, select, textarea { width: 100%; padding: 6px; margin-top: 4px; font: inherit; }
    button { margin-top: 14px; padding: 7px 14px; cursor: pointer; }
    .hidden { display: none; }
    .msg { margin: 10px 0; padding: 8px; border-radius: 4px; }
    .ok { background: #e3f4e6; }
    .err { background: #fbe4e4; }
    textarea { min-height: 60px; }
  </style>
</head>
<body>
  <aside>
    <h3>Settings</h3>
    <label>OpenAI API Key <input id="api_key" type="password" /></label>
    <label>Model Name <input id="model" /></label>
    <label>Initial Keywords <input id="initial_keywords" /></label>
    <label>Number of Prompts <input id="num_prompts" type="number" min="1" max="100" /></label>
    <label>Temperature (0-10) <span id="temp_value"></span>
      <input id="temperature" type="range" min="0" max="10" step="1" /></label>
    <div id="params_box" class="hidden">
      <label>Select Parameter <select id="selected_param"></select></label>
    </div>
    <div id="ar_box" class="hidden">
      <label>AR Mode
        <select id="ar_mode"><option>Preset</option><option>Custom</option></select></label>
      <label id="ar_preset_box">Preset AR <select id="ar_preset"></select></label>
      <label id="ar_custom_box">Custom AR <input id="ar_custom" placeholder="--ar 5:4" /></label>
    </div>
    <button id="save">Save Settings</button>
    <div id="save_msg"></div>
  </aside>
  <main>
    <h2>Generate Prompts</h2>
    <button id="generate">Generate Prompts</button>
    <div id="gen_msg"></div>
    <div id="results"></div>
    <div id="export" class="hidden">
      <a id="download" download="generated_prompts.csv">Download Prompts as CSV</a>
      <h3>Copy All Prompts</h3>
      <textarea id="all_prompts" rows="8" readonly></textarea>
    </div>
  </main>
  <script>
    const $ = (id) => document.getElementById(id);
    let sessionId = sessionStorage.getItem("session_id");
    let mode = "params";

    function fill(select, options, value) {
      select.innerHTML = "";
      for (const opt of options) {
        const el = document.createElement("option");
        el.textContent = opt;
        select.appendChild(el);
      }
      select.value = value;
    }

    function toggleAr() {
      const custom = $("ar_mode").value === "Custom";
      $("ar_preset_box").classList.toggle("hidden", custom);
      $("ar_custom_box").classList.toggle("hidden", !custom);
    }

    function formValues() {
      const custom = $("ar_mode").value === "Custom";
      return {
        api_key: $("api_key").value,
        model: $("model").value,
        initial_keywords: $("initial_keywords").value,
        num_prompts: Number($("num_prompts").value),
        temperature: Number($("temperature").value),
        selected_param: $("selected_param").value || "",
        ar_mode: $("ar_mode").value,
        ar_preset: custom ? "" : $("ar_preset").value,
        ar_custom: custom ? $("ar_custom").value : "",
      };
    }

    function show(target, text, ok) {
      target.innerHTML = "";
      const div = document.createElement("div");
      div.className = "msg " + (ok ? "ok" : "err");
      div.textContent = text;
      target.appendChild(div);
    }

    async function load() {
      const data = await (await fetch("/api/v1/settings")).json();
      const s = data.settings;
      mode = data.suffix_mode;
      $("api_key").value = s.api_key;
      $("model").value = s.model;
      $("initial_keywords").value = s.initial_keywords;
      $("num_prompts").value = s.num_prompts;
      $("temperature").value = data.temperature_slider;
      $("temp_value").textContent = data.temperature_slider;
      $("params_box").classList.toggle("hidden", mode !== "params");
      $("ar_box").classList.toggle("hidden", mode !== "aspect_ratio");
      fill($("selected_param"), data.param_options, data.displayed_param);
      fill($("ar_preset"), data.ar_presets, s.ar_mode === "Preset" ? data.active_aspect_ratio : "--ar 16:9");
      $("ar_mode").value = s.ar_mode;
      $("ar_custom").value = s.ar_custom;
      toggleAr();
      if (sessionId) {
        const res = await fetch(`/api/v1/sessions/${sessionId}/prompts`);
        if (res.ok) render((await res.json()).prompts);
      }
    }

    function render(prompts) {
      const results = $("results");
      results.innerHTML = "";
      prompts.forEach((p, i) => {
        const label = document.createElement("label");
        label.textContent = `Prompt #${i + 1}`;
        const area = document.createElement("textarea");
        area.readOnly = true;
        area.value = p;
        label.appendChild(area);
        results.appendChild(label);
      });
      $("export").classList.toggle("hidden", prompts.length === 0);
      $("all_prompts").value = prompts.join("\n");
      $("download").href = `/api/v1/sessions/${sessionId}/prompts.csv`;
    }

    $("temperature").addEventListener("input", (e) => { $("temp_value").textContent = e.target.value; });
    $("ar_mode").addEventListener("change", toggleAr);

    $("save").addEventListener("click", async () => {
      const res = await fetch("/api/v1/settings", {
        method: "PUT",
        headers: { "content-type": "application/json" },
        body: JSON.stringify(formValues()),
      });
      const body = await res.json();
      show($("save_msg"), res.ok ? body.message : body.error.message, res.ok);
    });

    $("generate").addEventListener("click", async () => {
      $("generate").disabled = true;
      try {
        const res = await fetch("/api/v1/prompts/generate", {
          method: "POST",
          headers: { "content-type": "application/json" },
          body: JSON.stringify({ ...formValues(), session_id: sessionId }),
        });
        const body = await res.json();
        if (!res.ok) {
          show($("gen_msg"), body.error.message, false);
          return;
        }
        sessionId = body.session_id;
        sessionStorage.setItem("session_id", sessionId);
        show($("gen_msg"), "Prompts generated successfully!", true);
        render(body.prompts);
      } finally {
        $("generate").disabled = false;
      }
    });

    load();
  </script>
</body>
</html>
"#;
