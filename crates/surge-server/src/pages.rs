//! HTML pages served by the web UI.
//!
//! Both pages are pure functions of their inputs. Every interpolated value
//! goes through [`sanitize`]; values placed in URLs are percent-encoded
//! first.

use crate::sanitize::{encode_component, sanitize};

const BASE_STYLE: &str = r#"
        body {
            font-family: Arial, sans-serif;
            margin: 0;
            padding: 0;
            background-color: #f8f9fa;
            color: #343a40;
        }
        header {
            background-color: #007bff;
            color: white;
            padding: 10px 20px;
            text-align: center;
        }
        main {
            padding: 20px;
        }
        footer {
            margin-top: 20px;
            text-align: center;
            color: #868e96;
            font-size: 14px;
        }"#;

const HOME_STYLE: &str = r#"
        h3 {
            display: inline;
            color: #007bff;
            cursor: pointer;
            text-decoration: underline;
        }
        h3:hover {
            color: #0056b3;
        }
        .separator {
            color: #6c757d;
            margin: 0 10px;
        }
        form {
            background-color: white;
            padding: 20px;
            border-radius: 5px;
            box-shadow: 0 0 10px rgba(0, 0, 0, 0.1);
        }
        textarea {
            width: 100%;
            padding: 10px;
            margin-bottom: 10px;
            border: 1px solid #ced4da;
            border-radius: 4px;
            font-size: 16px;
        }
        button {
            background-color: #007bff;
            color: white;
            border: none;
            padding: 10px 20px;
            border-radius: 4px;
            cursor: pointer;
            font-size: 16px;
        }
        button:hover {
            background-color: #0056b3;
        }
        #result {
            margin-top: 20px;
            padding: 10px;
            background-color: #e9ecef;
            border-radius: 4px;
            font-size: 14px;
            white-space: pre-wrap;
        }"#;

const HOME_SCRIPT: &str = r#"
        function currentRuleType() {
            return document.getElementById('ruleType').value.trim() || 'direct';
        }

        document.getElementById('viewCurrentRules').addEventListener('click', () => {
            window.location.href = '/rule?rule=' + encodeURIComponent(currentRuleType());
        });

        document.getElementById('viewRuleList').addEventListener('click', () => {
            window.location.href = '/rule-list';
        });

        document.getElementById('submitButton').addEventListener('click', async () => {
            const result = document.getElementById('result');
            const rules = document.getElementById('rulesInput').value.trim();

            if (!rules) {
                result.textContent = 'Rules must not be empty!';
                return;
            }

            try {
                const response = await fetch('/insert?rules=' + encodeURIComponent(rules) +
                    '&ruleType=' + encodeURIComponent(currentRuleType()), { method: 'GET' });

                if (response.ok) {
                    result.textContent = await response.text();
                    document.getElementById('rulesInput').value = '';
                } else {
                    result.textContent = 'Submit failed: ' + await response.text();
                }
            } catch (err) {
                result.textContent = 'Submit failed: ' + err.message;
            }
        });"#;

const LIST_STYLE: &str = r#"
        ul {
            list-style-type: none;
            padding: 0;
        }
        li {
            margin: 10px 0;
            display: flex;
            align-items: center;
        }
        a {
            color: #007bff;
            text-decoration: none;
            font-size: 18px;
            flex-grow: 1;
        }
        a:hover {
            color: #0056b3;
            text-decoration: underline;
        }
        button {
            background-color: #dc3545;
            color: white;
            border: none;
            padding: 5px 10px;
            border-radius: 4px;
            cursor: pointer;
            font-size: 14px;
        }
        button:hover {
            background-color: #c82333;
        }"#;

// The rule type travels in a data attribute, never inside inline script,
// so escaped quotes cannot be decoded back into executable code.
const LIST_SCRIPT: &str = r#"
        async function deleteRule(ruleType) {
            if (!confirm('Delete rule type "' + ruleType + '" and all of its rules?')) {
                return;
            }

            try {
                const response = await fetch('/delete-rule?rule=' + encodeURIComponent(ruleType), {
                    method: 'GET'
                });

                if (response.ok) {
                    alert(await response.text());
                    window.location.reload();
                } else {
                    alert('Delete failed: ' + await response.text());
                }
            } catch (err) {
                alert('Delete failed: ' + err.message);
            }
        }

        document.querySelectorAll('button[data-rule]').forEach((button) => {
            button.addEventListener('click', () => deleteRule(button.dataset.rule));
        });"#;

fn page(title: &str, extra_style: &str, header: &str, main: &str, script: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{BASE_STYLE}{extra_style}
    </style>
</head>
<body>
    <header>
{header}
    </header>
    <main>
{main}
    </main>
    <footer>
        <p>&copy; SurgeCustomRules</p>
    </footer>
    <script>{script}
    </script>
</body>
</html>
"#
    )
}

/// Landing page: insert form pre-filled with `rule`.
pub fn home(rule: &str) -> String {
    let main = format!(
        r#"        <h3 id="viewCurrentRules">View current rules</h3>
        <span class="separator">|</span>
        <h3 id="viewRuleList">View rule list</h3>
        <form id="ruleForm">
            <label for="ruleType">Rule type:</label>
            <input type="text" id="ruleType" name="ruleType" placeholder="default: direct" value="{rule}" />
            <textarea
                id="rulesInput"
                name="rules"
                rows="5"
                cols="30"
                placeholder="One rule per line. The 'DOMAIN,' prefix is optional."></textarea>
            <button type="button" id="submitButton">Submit rules</button>
        </form>
        <div id="result">Submission results appear here</div>"#,
        rule = sanitize(rule),
    );

    page(
        "SurgeCustomRules",
        HOME_STYLE,
        "        <h1>SurgeCustomRules</h1>\n        <p>Manage rules with ease</p>",
        &main,
        HOME_SCRIPT,
    )
}

/// Rule-type index with view links and delete buttons.
pub fn rule_list(rule_types: &[String]) -> String {
    let mut main = String::from("        <ul>\n");
    for rule in rule_types {
        let name = sanitize(rule);
        let href = sanitize(&encode_component(rule));
        main.push_str(&format!(
            "            <li>\n                <a href=\"/rule?rule={href}\">{name}</a>\n                <button type=\"button\" data-rule=\"{name}\">Delete</button>\n            </li>\n"
        ));
    }
    main.push_str("        </ul><hr>\n        <p><a href=\"/\">Back to home</a></p>");

    page(
        "Rule list",
        LIST_STYLE,
        "        <h1>Rule list</h1>",
        &main,
        LIST_SCRIPT,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn home_prefills_rule_type() {
        let html = home("proxy");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"value="proxy""#));
        assert!(html.contains("fetch('/insert?rules='"));
        assert!(html.contains("'/rule-list'"));
    }

    #[test]
    fn home_escapes_rule_type() {
        let html = home(r#""><script>alert(1)</script>"#);
        assert!(html.contains("&quot;&gt;&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>alert(1)"));
    }

    #[test]
    fn rule_list_links_every_type() {
        let html = rule_list(&["direct".to_string(), "my proxy".to_string()]);
        assert!(html.contains(r#"<a href="/rule?rule=direct">direct</a>"#));
        assert!(html.contains(r#"<a href="/rule?rule=my%20proxy">my proxy</a>"#));
        assert!(html.contains(r#"data-rule="my proxy""#));
        assert!(html.contains("/delete-rule?rule="));
    }

    #[test]
    fn rule_list_escapes_names() {
        let html = rule_list(&["<script>".to_string()]);
        assert!(html.contains(">&lt;script&gt;</a>"));
        assert!(html.contains(r#"data-rule="&lt;script&gt;""#));
        assert!(!html.contains("><script></a>"));
    }
}
