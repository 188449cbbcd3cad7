//! Prompt rendering for the summarization request.
//!
//! Pure string construction, no I/O. The fetcher guarantees every item
//! arrives with all four fields populated (placeholders substituted), so the
//! renderer reads them verbatim.

use crate::models::NewsItem;
use crate::utils::beijing_now;

/// Render the collected news into a single instruction prompt.
///
/// The prompt opens with the current UTC+8 date and three numbered
/// instructions (per-item investor-impact points, an overall market/policy
/// synthesis, Chinese output with clear numbering), followed by one
/// enumerated block per item in input order.
pub fn build_prompt(items: &[NewsItem]) -> String {
    let date_str = beijing_now().format("%Y-%m-%d").to_string();

    let mut prompt = format!(
        "今天是 {date_str}。以下是从东方财富财经频道抓取的新闻，请你：\n\
         1）逐条用简明要点（1-3 句）概括每条新闻对投资者的核心影响；\n\
         2）最后给出一个总体市场环境/政策风向的小结（3-5 句）；\n\
         3）整体输出为中文，编号清晰。\n\n\
         以下是原始新闻列表：\n"
    );

    for (i, item) in items.iter().enumerate() {
        prompt.push_str(&format!(
            "{}. 标题：{}\n   发布时间：{}\n   摘要：{}\n   链接：{}\n\n",
            i + 1,
            item.title,
            item.published_at,
            item.summary,
            item.link,
        ));
    }

    prompt
}
