//! The single-page prediction form served at `/`.

const GENDER_OPTIONS: &str = "{{gender_options}}";

const TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Diabetes Risk Prediction</title>
  <style>
    body { font-family: system-ui, sans-serif; max-width: 680px; margin: 48px auto; background: #fafafa; color: #262730; }
    h1, p.lead { text-align: center; }
    p.lead { color: #555; }
    form { display: grid; grid-template-columns: 1fr 1fr; gap: 18px; background: #fff; border: 1px solid #e0e0e0; border-radius: 10px; padding: 20px; }
    label { display: block; font-weight: 600; margin-bottom: 6px; }
    input, select { width: 100%; padding: 9px; border: 1px solid #ccc; border-radius: 6px; box-sizing: border-box; }
    button { grid-column: span 2; background: #0083ff; color: #fff; padding: 12px; border: none; border-radius: 8px; cursor: pointer; }
    #result { margin-top: 24px; padding: 14px; text-align: center; border-radius: 8px; font-weight: bold; }
    .yes { background: #ffe6e6; color: #d60000; }
    .no { background: #e6ffea; color: #007a00; }
  </style>
</head>
<body>
  <h1>Diabetes Risk Prediction</h1>
  <p class="lead">Enter your clinical values below.</p>

  <form id="predict-form">
    <div>
      <label for="age">Age</label>
      <input type="number" id="age" min="1" max="120" step="1" value="30" required />
    </div>
    <div>
      <label for="gender">Gender</label>
      <select id="gender" required>{{gender_options}}</select>
    </div>
    <div>
      <label for="bmi">BMI</label>
      <input type="number" id="bmi" min="10" max="60" step="0.1" value="25.0" required />
    </div>
    <div>
      <label for="hba1c">HbA1c (%)</label>
      <input type="number" id="hba1c" min="0" max="20" step="0.1" value="5.0" required />
    </div>
    <div>
      <label for="chol">Cholesterol</label>
      <input type="number" id="chol" min="0" max="600" step="0.1" value="180.0" required />
    </div>
    <div>
      <label for="tg">Triglycerides</label>
      <input type="number" id="tg" min="0" max="2000" step="0.1" value="150.0" required />
    </div>
    <button type="submit">Predict Diabetes Risk</button>
  </form>

  <div id="result"></div>

  <script>
    const form = document.getElementById('predict-form');
    const result = document.getElementById('result');
    const value = (id) => document.getElementById(id).value;

    form.addEventListener('submit', async (event) => {
      event.preventDefault();
      result.textContent = '';
      result.className = '';
      const body = {
        age: parseInt(value('age'), 10),
        gender: value('gender'),
        hba1c: parseFloat(value('hba1c')),
        bmi: parseFloat(value('bmi')),
        chol: parseFloat(value('chol')),
        tg: parseFloat(value('tg')),
      };
      try {
        const res = await fetch('/predict', {
          method: 'POST',
          headers: { 'Content-Type': 'application/json' },
          body: JSON.stringify(body),
        });
        const json = await res.json();
        if (json.error) throw new Error(json.error);
        result.textContent = `${json.message} (Confidence: ${json.confidence}%)`;
        result.className = json.result === 'Yes' ? 'yes' : 'no';
      } catch (err) {
        result.textContent = 'Error: ' + err.message;
      }
    });
  </script>
</body>
</html>
"##;

/// Render the form with one `<option>` per encoder label.
pub fn render(labels: &[String]) -> String {
    let options: String = labels
        .iter()
        .map(|label| {
            let label = escape_html(label);
            format!(r#"<option value="{label}">{label}</option>"#)
        })
        .collect();
    TEMPLATE.replace(GENDER_OPTIONS, &options)
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_one_option_per_label() {
        let html = render(&["F".to_string(), "M".to_string()]);
        assert!(html.contains(r#"<option value="F">F</option><option value="M">M</option>"#));
        assert!(!html.contains(GENDER_OPTIONS));
    }

    #[test]
    fn escapes_labels() {
        let html = render(&[r#"<b>"X"</b>"#.to_string()]);
        assert!(html.contains("&lt;b&gt;&quot;X&quot;&lt;/b&gt;"));
        assert!(!html.contains("<b>"));
    }
}
