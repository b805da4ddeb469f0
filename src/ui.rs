pub fn render_index(today: &str, monday: &str) -> String {
    INDEX_HTML
        .replace("{{TODAY}}", today)
        .replace("{{MONDAY}}", monday)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>FocusGrid</title>
  <style>
    :root {
      --bg: #050b14;
      --card: #0f172a;
      --hover: #1e293b;
      --text: #e2e8f0;
      --muted: #94a3b8;
      --cyan: #06b6d4;
      --green: #10b981;
      --purple: #8b5cf6;
      --yellow: #facc15;
      --red: #f43f5e;
      --border: #1e293b;
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--text);
      font-family: "Segoe UI", "Helvetica Neue", Arial, sans-serif;
      padding: 28px 20px 48px;
    }

    .app {
      width: min(1280px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 22px;
    }

    header {
      display: flex;
      align-items: baseline;
      justify-content: space-between;
      flex-wrap: wrap;
      gap: 10px;
    }

    h1 { margin: 0; font-size: 1.9rem; }
    h1 span { color: var(--cyan); }
    .subtitle { margin: 0; color: var(--muted); font-size: 0.95rem; }

    .week-nav {
      display: flex;
      align-items: center;
      gap: 14px;
    }

    #lblWeek { min-width: 200px; text-align: center; color: var(--muted); }

    button {
      background: var(--card);
      color: var(--text);
      border: 1px solid var(--border);
      border-radius: 10px;
      padding: 8px 16px;
      font-size: 0.95rem;
      cursor: pointer;
    }

    button:hover { background: var(--hover); }
    button.primary { border-color: var(--cyan); color: var(--cyan); }
    button.danger { border-color: var(--red); color: var(--red); }

    .card {
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 16px;
      padding: 18px;
      overflow-x: auto;
    }

    table { border-collapse: collapse; width: 100%; }

    th, td {
      padding: 8px 10px;
      border-bottom: 1px solid var(--border);
      text-align: center;
      white-space: nowrap;
    }

    th { color: var(--muted); font-weight: 600; font-size: 0.85rem; }
    th small { display: block; font-weight: 400; opacity: 0.7; }

    td.day-name { font-weight: bold; color: var(--cyan); }
    tr.today td { background: rgba(6, 182, 212, 0.07); }
    td.na-cell { color: #475569; }

    input[type="number"] { width: 64px; }
    input[type="time"], input[type="number"], input[type="date"], input[type="text"], select {
      background: var(--bg);
      color: var(--text);
      border: 1px solid var(--border);
      border-radius: 8px;
      padding: 5px 7px;
      color-scheme: dark;
    }

    .score-cell { font-weight: bold; }
    .score-high { color: var(--green); }
    .score-mid { color: var(--yellow); }
    .score-low { color: var(--red); }

    .nights {
      display: flex;
      gap: 12px;
      flex-wrap: wrap;
    }

    .night {
      background: var(--bg);
      border: 1px solid var(--border);
      border-radius: 10px;
      padding: 8px 12px;
      font-size: 0.85rem;
      color: var(--muted);
    }

    .night b { color: var(--yellow); }

    #status { color: var(--muted); font-size: 0.85rem; min-height: 1.2em; }
    #status.error { color: var(--red); }

    .modal {
      display: none;
      position: fixed;
      inset: 0;
      background: rgba(5, 11, 20, 0.8);
      align-items: center;
      justify-content: center;
      padding: 20px;
    }

    .modal-box {
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 16px;
      padding: 22px;
      width: min(560px, 100%);
      max-height: 85vh;
      overflow-y: auto;
      display: grid;
      gap: 14px;
    }

    .task-item {
      display: flex;
      justify-content: space-between;
      align-items: center;
      gap: 10px;
      border: 1px solid var(--border);
      border-radius: 10px;
      padding: 10px 12px;
    }

    .task-item strong { color: var(--cyan); }
    .task-item .meta { font-size: 0.8rem; color: var(--muted); }
    .task-actions { display: flex; gap: 6px; }
    .task-actions button { padding: 4px 9px; font-size: 0.8rem; }

    #taskForm { display: none; gap: 10px; }
    #taskForm label { display: grid; gap: 4px; font-size: 0.85rem; color: var(--muted); }
    .field-row { display: flex; gap: 12px; flex-wrap: wrap; }
    .days-row { display: flex; gap: 10px; flex-wrap: wrap; color: var(--muted); font-size: 0.85rem; }
  </style>
</head>
<body>
  <div class="app">
    <header>
      <div>
        <h1>Focus<span>Grid</span></h1>
        <p class="subtitle">Weighted daily habit scoring. Values save as you type.</p>
      </div>
      <div class="week-nav">
        <button id="btnPrev">&larr;</button>
        <span id="lblWeek"></span>
        <button id="btnNext">&rarr;</button>
        <button id="btnManage" class="primary">Manage tasks</button>
      </div>
    </header>

    <p id="status"></p>

    <section class="card">
      <table>
        <thead><tr id="tableHeader"></tr></thead>
        <tbody id="tableBody"></tbody>
      </table>
    </section>

    <section class="card">
      <p class="subtitle" style="margin-top:0">Nights (bedtime paired with the next morning)</p>
      <div class="nights" id="nights"></div>
    </section>
  </div>

  <div class="modal" id="configModal">
    <div class="modal-box">
      <h2 style="margin:0">Tasks</h2>
      <div id="taskList"></div>
      <div id="mainModalActions" style="display:flex; gap:10px">
        <button id="btnAdd" class="primary">Add task</button>
        <button id="btnCloseModal">Close</button>
      </div>

      <form id="taskForm">
        <input type="hidden" id="editIndex" value="-1" />
        <label>Name <input type="text" id="inpName" /></label>
        <div class="field-row">
          <label>Type
            <select id="inpType">
              <option value="bool">Done / not done</option>
              <option value="score">Score 0-100</option>
              <option value="time">Time target</option>
            </select>
          </label>
          <label>Weight <input type="number" id="inpWeight" min="1" value="10" /></label>
        </div>
        <div class="field-row" id="timeFields" style="display:none">
          <label>Target <input type="time" id="inpTarget" /></label>
          <label>Condition
            <select id="inpCondition">
              <option value="before">Before</option>
              <option value="after">After</option>
            </select>
          </label>
        </div>
        <div class="field-row">
          <label><input type="radio" name="freq" id="radioRepeat" checked /> Repeating</label>
          <label><input type="radio" name="freq" id="radioOnce" /> One-off</label>
        </div>
        <div class="field-row" id="divRepeatDates">
          <label>Start <input type="date" id="inpStartDate" /></label>
          <label>End <input type="date" id="inpEndDate" /></label>
        </div>
        <div class="days-row" id="divDaysSelector"></div>
        <div id="divOnceDate" style="display:none">
          <label>Date <input type="date" id="inpSpecificDate" /></label>
        </div>
        <div class="field-row">
          <button type="button" id="btnSaveTask" class="primary">Save</button>
          <button type="button" id="btnCancelForm">Cancel</button>
        </div>
      </form>
    </div>
  </div>

  <script>
    const TODAY = '{{TODAY}}';
    const DAY_CODES = ['Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat', 'Sun'];

    let monday = '{{MONDAY}}';
    let config = [];
    let records = {};

    // Liveness ping; the server shuts down when these stop (if enabled).
    setInterval(() => {
      fetch('/heartbeat', { method: 'POST' }).catch(() => {});
    }, 1000);

    const status = document.getElementById('status');
    const setStatus = (text, error) => {
      status.textContent = text;
      status.className = error ? 'error' : '';
    };

    const addDays = (key, n) => {
      const [y, m, d] = key.split('-').map(Number);
      const dt = new Date(Date.UTC(y, m - 1, d + n));
      return dt.toISOString().split('T')[0];
    };

    const weekdayCode = (key) => {
      const [y, m, d] = key.split('-').map(Number);
      return DAY_CODES[(new Date(Date.UTC(y, m - 1, d)).getUTCDay() + 6) % 7];
    };

    const isActive = (task, key) =>
      key >= task.startDate && key <= task.endDate && task.days.includes(weekdayCode(key));

    const fmtHour = (h) => {
      if (h == null) return '--';
      if (h >= 24) h -= 24;
      const hh = Math.floor(h);
      const mm = Math.round((h - hh) * 60);
      return String(hh).padStart(2, '0') + ':' + String(mm).padStart(2, '0');
    };

    async function api(path, options) {
      const res = await fetch(path, options);
      if (!res.ok) {
        let message = res.statusText;
        try { message = (await res.json()).error || message; } catch (e) {}
        throw new Error(message);
      }
      return res.status === 200 ? res.json() : null;
    }

    async function loadState() {
      const state = await api('/api/state');
      config = state.config;
      records = state.data;
    }

    function renderTable() {
      const end = addDays(monday, 6);
      document.getElementById('lblWeek').textContent = monday + ' to ' + end;

      document.getElementById('tableHeader').innerHTML =
        '<th>Day</th><th>Date</th>' +
        config.map((t) => '<th>' + t.name + '<small>' + t.weight + 'pts</small></th>').join('') +
        '<th>Score</th>';

      const tbody = document.getElementById('tableBody');
      tbody.innerHTML = '';

      for (let i = 0; i < 7; i++) {
        const key = addDays(monday, i);
        const tr = document.createElement('tr');
        if (key === TODAY) tr.className = 'today';
        let html = '<td class="day-name">' + weekdayCode(key) + '</td><td>' + key.slice(5) + '</td>';

        config.forEach((task, idx) => {
          if (!isActive(task, key)) {
            html += '<td class="na-cell">--</td>';
            return;
          }
          const val = (records[key] || {})[task.name];
          if (task.type === 'bool') {
            html += '<td><input type="checkbox" ' + (val ? 'checked' : '') +
              ' onchange="updateValue(\'' + key + '\', ' + idx + ', this.checked)"></td>';
          } else if (task.type === 'score') {
            html += '<td><input type="number" min="0" max="100" value="' + (val ?? '') +
              '" onchange="updateValue(\'' + key + '\', ' + idx + ', this.value)"></td>';
          } else {
            html += '<td><input type="time" value="' + (val || '') +
              '" onchange="updateValue(\'' + key + '\', ' + idx + ', this.value)"></td>';
          }
        });

        html += '<td class="score-cell" id="score-' + key + '">-</td>';
        tr.innerHTML = html;
        tbody.appendChild(tr);
      }
    }

    function paintScore(key, percent) {
      const cell = document.getElementById('score-' + key);
      if (!cell) return;
      const p = Math.round(percent);
      cell.textContent = p + '%';
      cell.className = 'score-cell ' + (p >= 80 ? 'score-high' : p >= 50 ? 'score-mid' : 'score-low');
    }

    async function loadWeek() {
      const week = await api('/api/week?monday=' + monday);
      week.days.forEach((day) => paintScore(day.date, day.percent));

      const nights = document.getElementById('nights');
      nights.innerHTML = '';
      week.sleep_durations.forEach((duration, i) => {
        if (duration == null) return;
        const from = week.days[i];
        const div = document.createElement('div');
        div.className = 'night';
        div.innerHTML = from.weekday + ' ' + fmtHour(from.sleep_hour) +
          ' &rarr; ' + fmtHour(week.days[i + 1].wake_hour) +
          ' <b>' + duration.toFixed(1) + 'h</b>';
        nights.appendChild(div);
      });
      if (!nights.children.length) {
        nights.innerHTML = '<span class="subtitle">No complete nights recorded this week.</span>';
      }
    }

    window.updateValue = async function (key, idx, value) {
      try {
        if (!records[key]) records[key] = {};
        records[key][config[idx].name] = value;
        const stats = await api('/api/value', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify({ date: key, task: config[idx].name, value }),
        });
        paintScore(key, stats.percent);
        loadWeek().catch(() => {});
        setStatus('Saved');
        setTimeout(() => setStatus(''), 1200);
      } catch (err) {
        setStatus(err.message, true);
      }
    };

    function changeWeek(days) {
      monday = addDays(monday, days);
      renderTable();
      loadWeek().catch((err) => setStatus(err.message, true));
    }

    // --- task manager ---
    const modal = document.getElementById('configModal');
    const form = document.getElementById('taskForm');

    function renderTaskList() {
      const list = document.getElementById('taskList');
      list.innerHTML = '';
      config.forEach((task, idx) => {
        const range = task.startDate === task.endDate
          ? 'on ' + task.startDate
          : task.startDate + ' to ' + task.endDate;
        const div = document.createElement('div');
        div.className = 'task-item';
        div.innerHTML =
          '<div><strong>' + task.name + '</strong>' +
          ' <span class="meta">(' + task.type + ', ' + task.weight + 'pts)</span>' +
          '<div class="meta">' + range + ' &middot; ' + task.days.split(',').join(' ') + '</div></div>' +
          '<div class="task-actions">' +
          '<button onclick="moveTask(' + idx + ', -1)"' + (idx === 0 ? ' disabled' : '') + '>&uarr;</button>' +
          '<button onclick="moveTask(' + idx + ', 1)"' + (idx === config.length - 1 ? ' disabled' : '') + '>&darr;</button>' +
          '<button onclick="editTask(' + idx + ')">Edit</button>' +
          '<button class="danger" onclick="deleteTask(' + idx + ')">X</button></div>';
        list.appendChild(div);
      });
    }

    async function saveConfig() {
      config = await api('/api/config', {
        method: 'PUT',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(config),
      });
    }

    window.moveTask = async function (idx, dir) {
      const other = idx + dir;
      if (other < 0 || other >= config.length) return;
      [config[idx], config[other]] = [config[other], config[idx]];
      try { await saveConfig(); renderTaskList(); } catch (err) { setStatus(err.message, true); }
    };

    window.deleteTask = async function (idx) {
      if (!confirm('Delete this task? Recorded values are kept.')) return;
      config.splice(idx, 1);
      try { await saveConfig(); renderTaskList(); } catch (err) { setStatus(err.message, true); }
    };

    function showForm(task, idx) {
      document.getElementById('editIndex').value = idx;
      document.getElementById('inpName').value = task ? task.name : '';
      document.getElementById('inpWeight').value = task ? task.weight : 10;
      document.getElementById('inpType').value = task ? task.type : 'bool';
      document.getElementById('inpTarget').value = task && task.target ? task.target : '';
      document.getElementById('inpCondition').value = task && task.condition ? task.condition : 'before';

      const once = task && task.startDate === task.endDate;
      document.getElementById('radioOnce').checked = !!once;
      document.getElementById('radioRepeat').checked = !once;
      document.getElementById('inpSpecificDate').value = once ? task.startDate : '';
      document.getElementById('inpStartDate').value = task && !once ? task.startDate : TODAY.slice(0, 4) + '-01-01';
      document.getElementById('inpEndDate').value = task && !once ? task.endDate : TODAY.slice(0, 4) + '-12-31';

      const days = task ? task.days.split(',') : DAY_CODES;
      document.querySelectorAll('.day-chk').forEach((c) => { c.checked = days.includes(c.value); });

      toggleFormInputs();
      toggleFreqInputs();
      form.style.display = 'grid';
      document.getElementById('mainModalActions').style.display = 'none';
    }

    window.editTask = (idx) => showForm(config[idx], idx);

    function hideForm() {
      form.style.display = 'none';
      document.getElementById('mainModalActions').style.display = 'flex';
    }

    function toggleFormInputs() {
      const type = document.getElementById('inpType').value;
      document.getElementById('timeFields').style.display = type === 'time' ? 'flex' : 'none';
    }

    function toggleFreqInputs() {
      const repeat = document.getElementById('radioRepeat').checked;
      document.getElementById('divRepeatDates').style.display = repeat ? 'flex' : 'none';
      document.getElementById('divDaysSelector').style.display = repeat ? 'flex' : 'none';
      document.getElementById('divOnceDate').style.display = repeat ? 'none' : 'block';
    }

    async function saveTaskFromForm() {
      const idx = parseInt(document.getElementById('editIndex').value, 10);
      const name = document.getElementById('inpName').value.trim();
      if (!name) { setStatus('Name required', true); return; }

      let startDate, endDate, days;
      if (document.getElementById('radioOnce').checked) {
        const date = document.getElementById('inpSpecificDate').value;
        if (!date) { setStatus('Pick a date', true); return; }
        startDate = endDate = date;
        days = weekdayCode(date);
      } else {
        startDate = document.getElementById('inpStartDate').value;
        endDate = document.getElementById('inpEndDate').value;
        if (!startDate || !endDate) { setStatus('Start and end dates required', true); return; }
        if (startDate > endDate) { setStatus('Start must not be after end', true); return; }
        days = Array.from(document.querySelectorAll('.day-chk:checked')).map((c) => c.value).join(',');
        if (!days) { setStatus('Select at least one day', true); return; }
      }

      const type = document.getElementById('inpType').value;
      if (type === 'time' && !document.getElementById('inpTarget').value) {
        setStatus('Time tasks need a target', true);
        return;
      }

      const task = {
        name,
        type,
        weight: parseFloat(document.getElementById('inpWeight').value) || 1,
        days,
        startDate,
        endDate,
      };
      if (type === 'time') {
        task.target = document.getElementById('inpTarget').value;
        task.condition = document.getElementById('inpCondition').value;
      }

      if (idx === -1) config.push(task);
      else config[idx] = task;

      try {
        await saveConfig();
        renderTaskList();
        hideForm();
        setStatus('');
      } catch (err) {
        setStatus(err.message, true);
      }
    }

    // --- wiring ---
    document.getElementById('divDaysSelector').innerHTML = DAY_CODES
      .map((d) => '<label><input type="checkbox" class="day-chk" value="' + d + '" checked /> ' + d + '</label>')
      .join('');

    document.getElementById('btnPrev').addEventListener('click', () => changeWeek(-7));
    document.getElementById('btnNext').addEventListener('click', () => changeWeek(7));
    document.getElementById('btnManage').addEventListener('click', () => {
      renderTaskList();
      hideForm();
      modal.style.display = 'flex';
    });
    document.getElementById('btnCloseModal').addEventListener('click', () => {
      modal.style.display = 'none';
      renderTable();
      loadWeek().catch((err) => setStatus(err.message, true));
    });
    document.getElementById('btnAdd').addEventListener('click', () => showForm(null, -1));
    document.getElementById('btnCancelForm').addEventListener('click', hideForm);
    document.getElementById('btnSaveTask').addEventListener('click', saveTaskFromForm);
    document.getElementById('inpType').addEventListener('change', toggleFormInputs);
    document.getElementById('radioRepeat').addEventListener('change', toggleFreqInputs);
    document.getElementById('radioOnce').addEventListener('change', toggleFreqInputs);

    (async () => {
      try {
        await loadState();
        renderTable();
        await loadWeek();
      } catch (err) {
        setStatus(err.message, true);
      }
    })();
  </script>
</body>
</html>
"#;
