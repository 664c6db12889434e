//! Prompt templates for the simulator endpoints, one per route.
//!
//! Builders are pure: the same request and guidelines always produce the same prompt.
//! Structured fields render as compact JSON in the client's key order (`null` when
//! absent). Text fields render raw when they are strings, as JSON otherwise, and
//! empty when absent.

use serde::Serialize;
use serde_json::Value;

use crate::guidelines::Guidelines;
use crate::llm_client::prompts::{fill_template, guideline_block, EDUCATOR_PERSONA};
use crate::simulation::models::{
    ChatRequest, EvaluateRequest, InitialGuidanceRequest, SummarizeRequest,
};

/// Chat guidance template.
/// Replace: {persona}, {user_info}, {theme}, {history}, {guidelines}, {message}
pub const CHAT_PROMPT_TEMPLATE: &str = r#"{persona}患者の質問に対し、根拠に基づいた、具体的かつ実践的な個別指導を行ってください。糖尿病診療ガイドライン2024の内容を主要な参考情報としつつ、必要に応じて、あなたの持つ正確な医療知識を活用して、より包括的で実践的なアドバイスを提供してください。ただし、情報の正確性を最優先し、ハルシネーション（事実に基づかない情報生成）は絶対に避けてください。

**特に以下の点に注意してください:**
- 患者の状況を深く理解し、共感的な態度で接してください。
- 患者の年齢、併存疾患、活動レベル、低血糖リスクなどを考慮し、HbA1cの目標値や指導内容を柔軟に調整してください。特に高齢者のHbA1c目標値については、ガイドラインに示されているように個別の状況に応じた緩やかな目標値も考慮してください。
- 「できません」「わかりません」「医師に確認してください」といった突き放すような表現は避け、常に前向きで建設的な言葉遣いを心がけてください。
- 情報が不足している場合でも、すぐに「情報がないので答えられません」とせず、まずは一般的な情報や目安を提示し、その上で「より具体的なアドバイスのために、〇〇について教えていただけますか？」のように、積極的に必要な情報を質問してください。
- 医師や他の専門職への相談が必要な場合は、「〇〇の理由から、主治医の先生とご相談いただくことが最も大切です。例えば、〇〇について確認していただくと、よりあなたに合った治療方針が見つかるでしょう。」のように、その必要性を具体的に説明し、患者が次に取るべき行動を明確に示してください。
- 患者情報（身長、体重、活動量など）を積極的に活用し、具体的な数値（例: BMI、推定エネルギー必要量、目標体重など）を計算して提示してください。これらの数値はあくまで目安であることを明確に伝えつつ、患者が自身の状況を具体的にイメージできるようサポートしてください。
- 「バランスの良い食事」のような抽象的な表現ではなく、炭水化物、タンパク質、脂質の目安となる割合や、具体的な食品群の例（例: 主食、主菜、副菜の組み合わせ）を挙げて説明してください。必要に応じて、糖尿病診療ガイドライン2024に記載されている具体的な数値や推奨事項を引用してください。
- 腎障害のある方へのタンパク質摂取については、具体的な食品例や摂取の目安を提示しつつ、医師や管理栄養士への確認が必要であることを明確に伝えてください。
- チーム医療の連携が必要な場合でも、患者への具体的なアドバイスを伴い、丸投げにならないようにしてください。
- 患者が具体的な行動に移せるような、実行可能なアドバイスを心がけてください。

患者情報: {user_info}
選択されたテーマ: {theme}
これまでの会話履歴: {history}

{guidelines}

患者の質問: "{message}"

上記の情報を踏まえ、指導を行ってください。"#;

/// Simulation evaluation template. Output sections are fixed Markdown headers.
/// Replace: {persona}, {user_info}, {chat_history}, {guidelines}
pub const EVALUATION_PROMPT_TEMPLATE: &str = r#"{persona}以下の患者情報とシミュレーションでの会話履歴を元に、患者（シミュレーションのプレイヤー）の理解度と行動を評価し、今後必要な指導のポイントを具体的かつ分かりやすく表示してください。評価は患者自身に向けたものであり、患者が今後どのように自己管理を進めるべきか、具体的な行動変容を促す内容にしてください。糖尿病診療ガイドライン2024を主要な参考情報としつつ、あなたの持つ正確な医療知識を活用して評価を行ってください。出力はMarkdown形式で、箇条書きなどを活用し、読みやすくしてください。

患者情報: {user_info}
会話履歴: {chat_history}

{guidelines}

評価のポイント:
1.  シミュレーション中の患者の質問や反応から読み取れる理解度。
2.  糖尿病の自己管理（食事、運動、服薬など）に関する患者の行動や知識で良かった点。
3.  糖尿病の自己管理に関する患者の行動や知識で改善が必要な点。
4.  今後、患者が具体的に取り組むべき指導ポイント（行動変容を促す実践的なアドバイス）。

出力形式:
## あなたのシミュレーション結果
[あなたの理解度に関する総評]

### 良かった点
- [あなたが理解し、適切に質問・行動できた具体的な点1]
- [あなたが理解し、適切に質問・行動できた具体的な点2]

### 今後の改善点と具体的な指導ポイント
- [あなたがさらに理解を深めるべき点や、行動を改善すべき点1]
- [その改善点に対する具体的な指導ポイント1（例: 「〇〇を△△しましょう」）]
- [あなたがさらに理解を深めるべき点や、行動を改善すべき点2]
- [その改善点に対する具体的な指導ポイント2]
"#;

/// Patient-facing conversation summary. No guideline grounding.
/// Replace: {chat_history}
pub const SUMMARY_PROMPT_TEMPLATE: &str = r#"以下の会話履歴を、シミュレーションを行った患者自身が、この会話を通じて何を得たか、何が重要だったかを理解しやすいように、患者向けの言葉で要約してください。会話の主要なトピック、患者の質問、それに対する指導のポイントに焦点を当て、簡潔にまとめてください。

会話履歴:
{chat_history}

要約:"#;

/// Opening message for a new simulation.
/// Replace: {persona}, {user_info}, {theme}, {guidelines}
pub const INITIAL_GUIDANCE_PROMPT_TEMPLATE: &str = r#"{persona}以下の患者情報と選択されたテーマに基づき、患者がシミュレーションを始めるにあたって、簡潔で分かりやすい最初の指導メッセージを提供してください。患者が次に何を質問すれば良いか、会話のきっかけとなるような内容にしてください。

患者情報: {user_info}
選択されたテーマ: {theme}

{guidelines}

最初の指導メッセージ:"#;

pub fn chat_prompt(request: &ChatRequest, guidelines: &Guidelines) -> String {
    let user_info = to_json(&request.user_info);
    let history = to_json(&request.history);
    let theme = text(&request.theme);
    let message = text(&request.message);
    let guidelines = guideline_block(guidelines);

    fill_template(
        CHAT_PROMPT_TEMPLATE,
        &[
            ("persona", EDUCATOR_PERSONA),
            ("user_info", &user_info),
            ("theme", &theme),
            ("history", &history),
            ("guidelines", &guidelines),
            ("message", &message),
        ],
    )
}

pub fn evaluation_prompt(request: &EvaluateRequest, guidelines: &Guidelines) -> String {
    let user_info = to_json(&request.user_info);
    let chat_history = to_json(&request.chat_history);
    let guidelines = guideline_block(guidelines);

    fill_template(
        EVALUATION_PROMPT_TEMPLATE,
        &[
            ("persona", EDUCATOR_PERSONA),
            ("user_info", &user_info),
            ("chat_history", &chat_history),
            ("guidelines", &guidelines),
        ],
    )
}

pub fn summary_prompt(request: &SummarizeRequest) -> String {
    let chat_history = to_json(&request.chat_history);
    fill_template(SUMMARY_PROMPT_TEMPLATE, &[("chat_history", &chat_history)])
}

pub fn initial_guidance_prompt(request: &InitialGuidanceRequest, guidelines: &Guidelines) -> String {
    let user_info = to_json(&request.user_info);
    let theme = text(&request.theme);
    let guidelines = guideline_block(guidelines);

    fill_template(
        INITIAL_GUIDANCE_PROMPT_TEMPLATE,
        &[
            ("persona", EDUCATOR_PERSONA),
            ("user_info", &user_info),
            ("theme", &theme),
            ("guidelines", &guidelines),
        ],
    )
}

/// Compact JSON as a browser's `JSON.stringify` would print it; `None` renders as `null`.
fn to_json<T: Serialize>(value: &Option<T>) -> String {
    serde_json::to_value(value)
        .map(integral_floats)
        .unwrap_or(Value::Null)
        .to_string()
}

/// `60.0` prints as `60`, matching how the front-end serializes numbers.
fn integral_floats(value: Value) -> Value {
    const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

    match value {
        Value::Number(n) => match n.as_f64() {
            Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => {
                Value::from(f as i64)
            }
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(integral_floats).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, v)| (key, integral_floats(v)))
                .collect(),
        ),
        other => other,
    }
}

/// Strings verbatim, anything else as JSON text, absent as empty.
fn text(value: &Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn guidelines() -> Guidelines {
        Guidelines::from_parts("GUIDELINE-PART-ONE\n目標HbA1c\n", "GUIDELINE-PART-TWO {message}\n")
    }

    fn chat_request() -> ChatRequest {
        ChatRequest {
            message: Some(json!("What should I eat?")),
            history: Some(vec![json!({"role": "user", "text": "hi"})]),
            user_info: Some(json!({"age": 65, "name": "山田"})),
            theme: Some(json!("diet")),
        }
    }

    #[test]
    fn test_chat_prompt_interpolates_all_fields() {
        let prompt = chat_prompt(&chat_request(), &guidelines());
        assert!(prompt.starts_with(EDUCATOR_PERSONA));
        assert!(prompt.contains(r#"患者情報: {"age":65,"name":"山田"}"#));
        assert!(prompt.contains("選択されたテーマ: diet"));
        assert!(prompt.contains(r#"これまでの会話履歴: [{"role":"user","text":"hi"}]"#));
        assert!(prompt.contains(r#"患者の質問: "What should I eat?""#));
    }

    #[test]
    fn test_prompts_are_deterministic() {
        let g = guidelines();
        assert_eq!(chat_prompt(&chat_request(), &g), chat_prompt(&chat_request(), &g));

        let eval = EvaluateRequest {
            chat_history: Some(vec![json!({"role": "model", "text": "こんにちは"})]),
            user_info: Some(json!({"age": 70})),
        };
        assert_eq!(evaluation_prompt(&eval, &g), evaluation_prompt(&eval, &g));
    }

    #[test]
    fn test_guidelines_appear_verbatim_in_grounded_prompts() {
        let g = guidelines();
        let prompts = [
            chat_prompt(&chat_request(), &g),
            evaluation_prompt(&EvaluateRequest::default(), &g),
            initial_guidance_prompt(&InitialGuidanceRequest::default(), &g),
        ];
        for prompt in &prompts {
            assert!(prompt.contains(g.part1()));
            assert!(prompt.contains(g.part2()));
        }
    }

    #[test]
    fn test_summary_prompt_has_no_guidelines() {
        let prompt = summary_prompt(&SummarizeRequest {
            chat_history: Some(vec![json!({"role": "user", "text": "hi"})]),
        });
        assert!(!prompt.contains("GUIDELINE-PART"));
        assert!(!prompt.contains("糖尿病診療ガイドライン2024"));
        assert!(prompt.contains(r#"[{"role":"user","text":"hi"}]"#));
        assert!(prompt.ends_with("要約:"));
    }

    #[test]
    fn test_evaluation_prompt_keeps_section_headers() {
        let prompt = evaluation_prompt(&EvaluateRequest::default(), &guidelines());
        assert!(prompt.contains("### 良かった点"));
        assert!(prompt.contains("### 今後の改善点と具体的な指導ポイント"));
    }

    #[test]
    fn test_absent_fields_render_as_null_and_empty() {
        let prompt = initial_guidance_prompt(&InitialGuidanceRequest::default(), &guidelines());
        assert!(prompt.contains("患者情報: null\n"));
        assert!(prompt.contains("選択されたテーマ: \n"));

        let prompt = chat_prompt(&ChatRequest::default(), &guidelines());
        assert!(prompt.contains("これまでの会話履歴: null\n"));
        assert!(prompt.contains(r#"患者の質問: """#));
    }

    #[test]
    fn test_request_text_is_not_expanded_as_a_slot() {
        let request = ChatRequest {
            message: Some(json!("{guidelines}")),
            ..chat_request()
        };
        let prompt = chat_prompt(&request, &guidelines());
        assert!(prompt.contains(r#"患者の質問: "{guidelines}""#));
        // guideline text carrying a slot name stays literal too
        assert!(prompt.contains("GUIDELINE-PART-TWO {message}"));
    }

    #[test]
    fn test_user_info_keeps_client_key_order() {
        let request = InitialGuidanceRequest {
            theme: Some(json!("運動")),
            user_info: Some(json!({"name": "山田", "age": 65, "height": 170})),
        };
        let prompt = initial_guidance_prompt(&request, &guidelines());
        assert!(prompt.contains(r#"患者情報: {"name":"山田","age":65,"height":170}"#));
    }

    #[test]
    fn test_integral_floats_print_without_fraction() {
        let request = EvaluateRequest {
            chat_history: Some(vec![json!({"turn": 1.0, "glucose": 132.5})]),
            user_info: Some(json!({"weight": 60.0, "hba1c": 7.2, "meds": [1.0, -0.0]})),
        };
        let prompt = evaluation_prompt(&request, &guidelines());
        assert!(prompt.contains(r#"患者情報: {"weight":60,"hba1c":7.2,"meds":[1,0]}"#));
        assert!(prompt.contains(r#"会話履歴: [{"turn":1,"glucose":132.5}]"#));
    }

    #[test]
    fn test_non_string_text_fields_render_as_json() {
        let request = ChatRequest {
            message: Some(json!(42)),
            theme: Some(json!(["diet", "exercise"])),
            ..chat_request()
        };
        let prompt = chat_prompt(&request, &guidelines());
        assert!(prompt.contains(r#"患者の質問: "42""#));
        assert!(prompt.contains(r#"選択されたテーマ: ["diet","exercise"]"#));
    }
}
