//! Household review markup.

use huji_core::{Household, Member, MemberField};

/// Placeholder shown when there are no households.
pub const NO_DATA_HTML: &str = r#"<div class="no-data">未找到户籍数据</div>"#;

/// Element id of the household block at `index`.
pub fn block_id(index: usize) -> String {
    format!("household-{index}")
}

/// Escape text for use in element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn render_member(html: &mut String, member: &Member) {
    html.push_str(r#"<div class="member-item">"#);
    for field in MemberField::ALL {
        html.push_str(&format!(
            r#"<div><span class="label">{}：</span><span class="value">{}</span></div>"#,
            field.label(),
            escape_html(member.field(field)),
        ));
    }
    html.push_str("</div>");
}

fn render_household(html: &mut String, index: usize, household: &Household) {
    let mut heading = format!("户号：{}", escape_html(&household.household_id));
    if !household.address.is_empty() {
        heading.push_str(&format!(" | 地址：{}", escape_html(&household.address)));
    }

    html.push_str(&format!(
        r#"<div class="household-item" id="{id}"><div class="household-header"><h3>{heading}</h3><button class="print-btn" type="button" data-index="{index}" onclick="printHousehold({index})">打印此户</button></div><div class="member-list">"#,
        id = block_id(index),
    ));
    for member in &household.members {
        render_member(html, member);
    }
    html.push_str("</div></div>");
}

/// Render the contents of the household container.
///
/// Blocks are numbered from 0 in the order given.
pub fn render_households(households: &[Household]) -> String {
    if households.is_empty() {
        return NO_DATA_HTML.to_string();
    }

    let mut html = String::new();
    for (index, household) in households.iter().enumerate() {
        render_household(&mut html, index, household);
    }
    html
}

const PAGE_STYLE: &str = r"
body { font-family: Arial, sans-serif; margin: 0; padding: 20px; background-color: #f5f5f5; }
h1 { color: #2c3e50; }
.upload-area { border: 2px dashed #3498db; border-radius: 8px; padding: 30px; text-align: center; margin-bottom: 20px; background-color: white; }
.no-data { text-align: center; color: #999; padding: 40px; }
.household-item { border: 1px solid #e0e0e0; border-radius: 8px; padding: 20px; margin-bottom: 20px; background-color: #fafafa; }
.household-header { display: flex; justify-content: space-between; align-items: center; margin-bottom: 15px; padding-bottom: 10px; border-bottom: 1px solid #e0e0e0; }
.household-header h3 { margin: 0; color: #2c3e50; }
.print-btn { background-color: #3498db; color: white; border: none; padding: 8px 16px; border-radius: 4px; cursor: pointer; }
.member-list { margin-top: 15px; }
.member-item { display: grid; grid-template-columns: 1fr 1fr 1fr 1fr; gap: 10px; padding: 10px; background-color: white; border-radius: 4px; margin-bottom: 8px; border-left: 4px solid #3498db; }
.member-item .label { font-weight: bold; color: #555; }
.member-item .value { color: #333; }
";

/// Wrap a rendered container in the full review page.
///
/// `extra` is inserted after the heading; front ends use it for their upload
/// controls and the `printHousehold` script.
pub fn render_page(container: &str, extra: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="UTF-8">
<title>户籍套打工具</title>
<style>{PAGE_STYLE}</style>
</head>
<body>
<h1>户籍套打工具</h1>
{extra}
<div id="householdContainer">{container}</div>
</body>
</html>
"#
    )
}
