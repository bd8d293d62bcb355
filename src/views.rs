use crate::{
    models::{
        domain::Page,
        dto::response::{QuestionView, SessionView},
    },
    services::image_store::Figure,
};

const TITLE: &str = "🧮 수학 문제 풀이";
const CHOICE_MARKS: [&str; 10] = ["①", "②", "③", "④", "⑤", "⑥", "⑦", "⑧", "⑨", "⑩"];

pub fn escape(text: &str) -> String {
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

/// Renders whichever screen the session is on.
pub fn render_page(view: &SessionView) -> String {
    let body = match view.page {
        Page::Home => home(view),
        Page::SelectSubject => select_subject(view),
        Page::Quiz => quiz(view),
    };
    // Polling drives the countdown; stop once input is closed.
    let refresh = if view.can_answer {
        r#"<meta http-equiv="refresh" content="1">"#
    } else {
        ""
    };
    format!(
        r#"<!DOCTYPE html>
<html lang="ko">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
{refresh}
<title>수학 문제 풀이</title>
<style>
body {{ font-family: sans-serif; max-width: 42rem; margin: 2rem auto; padding: 0 1rem; }}
form.inline {{ display: inline; }}
.timer {{ font-size: 1.5rem; font-variant-numeric: tabular-nums; }}
.correct {{ color: #1b7f3b; }}
.wrong {{ color: #b3261e; }}
.caption {{ color: #666; font-size: 0.9rem; }}
.error {{ color: #b3261e; background: #fdecea; padding: 0.5rem; }}
figure img {{ max-width: 100%; }}
</style>
</head>
<body>
<h1>{TITLE}</h1>
{body}
</body>
</html>
"#
    )
}

fn button(action: &str, label: &str) -> String {
    format!(
        r#"<form class="inline" method="post" action="{}"><button type="submit">{}</button></form>"#,
        action,
        escape(label)
    )
}

fn home(view: &SessionView) -> String {
    let subjects = view
        .subjects
        .iter()
        .map(|s| s.subject.name())
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        r#"<h2>교과 선택형 문제</h2>
<ul>
<li>교과: <strong>{}</strong></li>
<li>문항당 제한 시간 <strong>5분</strong></li>
</ul>
<p class="caption">현재 등록된 문제: {}개 교과, 총 {}문항</p>
{}"#,
        escape(&subjects),
        view.summary.subjects_with_questions,
        view.summary.total_questions,
        button("/select", "문제 풀기 시작 ▶")
    )
}

fn select_subject(view: &SessionView) -> String {
    let mut out = String::from("<h2>교과 선택</h2>\n<ul>\n");
    for option in &view.subjects {
        let name = escape(option.subject.name());
        out.push_str(&format!(
            r#"<li><form class="inline" method="post" action="/quiz"><input type="hidden" name="subject" value="{name}"><button type="submit">{name}</button></form> <span class="caption">{}문항</span></li>
"#,
            option.question_count
        ));
    }
    out.push_str("</ul>\n");
    out.push_str(&button("/home", "처음 화면으로"));
    out.push(' ');
    out.push_str(&button("/reload", "문제 새로고침"));
    out
}

fn quiz(view: &SessionView) -> String {
    let subject = view.subject.map(|s| s.name()).unwrap_or_default();
    let Some(question) = &view.question else {
        return format!(
            "<p>현재 선택된 교과 <strong>{}</strong> 에 등록된 문제가 없습니다.</p>\n{}",
            escape(subject),
            button("/select", "교과 다시 선택")
        );
    };

    let mut out = format!(
        "<h2>{} - {}번</h2>\n<p class=\"timer\">남은 시간 {}</p>\n<p>{}</p>\n",
        escape(subject),
        question.index + 1,
        view.remaining_label,
        escape(&question.text)
    );
    if let Some(figure) = &question.figure {
        out.push_str(&figure_block(figure, subject, question.index));
    }

    if view.can_answer {
        out.push_str(&answer_form(question));
    } else {
        out.push_str(&choice_list(question));
        out.push_str(&outcome(view, question));
    }

    out.push_str("<p>");
    out.push_str(&button("/quiz/retry", "다시 풀기"));
    out.push(' ');
    out.push_str(&button("/quiz/next", "다음 문제"));
    out.push(' ');
    out.push_str(&button("/select", "교과 선택"));
    out.push(' ');
    out.push_str(&button("/home", "처음 화면으로"));
    out.push_str("</p>\n");
    out
}

fn mark(index: usize) -> String {
    CHOICE_MARKS
        .get(index)
        .map(|m| m.to_string())
        .unwrap_or_else(|| format!("({})", index + 1))
}

fn figure_block(figure: &Figure, subject: &str, index: usize) -> String {
    match figure {
        Figure::Available { url } => format!(
            "<figure><img src=\"{}\" alt=\"{caption}\"><figcaption class=\"caption\">{caption}</figcaption></figure>\n",
            escape(url),
            caption = escape(&format!("{} {}번", subject, index + 1))
        ),
        Figure::Missing { path } if path.is_empty() => {
            "<p class=\"error\">이미지 경로가 비어 있습니다. questions.json을 확인하세요.</p>\n".to_string()
        }
        Figure::Missing { path } => format!(
            "<p class=\"error\">이미지 파일을 찾을 수 없습니다. <code>{}</code></p>\n",
            escape(path)
        ),
    }
}

fn answer_form(question: &QuestionView) -> String {
    let mut out = String::from(r#"<form method="post" action="/quiz/answer">"#);
    out.push('\n');
    for (i, choice) in question.choices.iter().enumerate() {
        out.push_str(&format!(
            r#"<label><input type="radio" name="choice" value="{i}"{}> {} {}</label><br>
"#,
            if i == 0 { " checked" } else { "" },
            mark(i),
            escape(choice)
        ));
    }
    out.push_str(r#"<button type="submit">정답 확인</button></form>"#);
    out.push('\n');
    out
}

fn choice_list(question: &QuestionView) -> String {
    let mut out = String::from("<ol>\n");
    for (i, choice) in question.choices.iter().enumerate() {
        out.push_str(&format!("<li>{} {}</li>\n", mark(i), escape(choice)));
    }
    out.push_str("</ol>\n");
    out
}

fn outcome(view: &SessionView, question: &QuestionView) -> String {
    let verdict = match view.is_correct {
        Some(true) => r#"<p class="correct">정답입니다! ✅</p>"#.to_string(),
        Some(false) => r#"<p class="wrong">오답입니다. ❌</p>"#.to_string(),
        None if view.timer_expired => r#"<p class="wrong">⏰ 시간이 초과되었습니다.</p>"#.to_string(),
        None => String::new(),
    };
    let answer = question
        .correct_index
        .and_then(|i| question.choices.get(i).map(|c| format!("{} {}", mark(i), escape(c))))
        .map(|a| format!("<p>정답: {}</p>\n", a))
        .unwrap_or_default();
    let explanation = question
        .explanation
        .as_deref()
        .map(|e| format!("<p><strong>해설</strong> {}</p>\n", escape(e)))
        .unwrap_or_default();
    format!("{}\n{}{}", verdict, answer, explanation)
}
