use answer_key_submit::form::CorrectionForm;
use answer_key_submit::models::{ChoiceLabel, ExamAnswerKey, QuestionKey};
use answer_key_submit::workflow::status::{MSG_CONNECTION_ERROR, MSG_CORRECTION_DONE};
use answer_key_submit::workflow::StatusKind;
use answer_key_submit::{App, Config, SubmissionController, SubmissionResult};
use axum::extract::{Multipart, Path as AxumPath, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use serde_json::json;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

/// 服务器收到的一个字段
#[derive(Debug, Clone)]
struct Received {
    name: String,
    file_name: Option<String>,
    body: Vec<u8>,
}

type Seen = Arc<Mutex<Vec<Received>>>;

const RESULT_BYTES: &[u8] = b"PK\x03\x04 fake workbook";

async fn record_fields(seen: &Seen, mut multipart: Multipart) {
    let mut fields = Vec::new();
    while let Some(field) = multipart.next_field().await.unwrap() {
        let name = field.name().unwrap_or_default().to_string();
        let file_name = field.file_name().map(str::to_string);
        let body = field.bytes().await.unwrap().to_vec();
        fields.push(Received {
            name,
            file_name,
            body,
        });
    }
    *seen.lock().await = fields;
}

async fn upload_ok(State(seen): State<Seen>, multipart: Multipart) -> impl IntoResponse {
    record_fields(&seen, multipart).await;
    (
        [(header::CONTENT_DISPOSITION, "attachment; filename=\"result.xlsx\"")],
        RESULT_BYTES.to_vec(),
    )
}

async fn upload_missing_file(State(seen): State<Seen>, multipart: Multipart) -> impl IntoResponse {
    record_fields(&seen, multipart).await;
    (StatusCode::BAD_REQUEST, "Missing file")
}

async fn upload_no_disposition(State(seen): State<Seen>, multipart: Multipart) -> impl IntoResponse {
    record_fields(&seen, multipart).await;
    RESULT_BYTES.to_vec()
}

async fn template(AxumPath(name): AxumPath<String>) -> impl IntoResponse {
    if name == "modelo.pdf" {
        (
            StatusCode::OK,
            [(header::CONTENT_DISPOSITION, "attachment; filename=modelo.pdf")],
            b"%PDF-1.4".to_vec(),
        )
            .into_response()
    } else {
        (StatusCode::NOT_FOUND, "Arquivo não encontrado.").into_response()
    }
}

async fn spawn_server(upload: axum::routing::MethodRouter<Seen>) -> (String, Seen) {
    let seen: Seen = Arc::new(Mutex::new(Vec::new()));
    let app = Router::new()
        .route("/upload", upload)
        .route("/download_template/:name", get(template))
        .with_state(seen.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{}", addr), seen)
}

fn q(n: u8) -> QuestionKey {
    QuestionKey::new(n).unwrap()
}

fn controller_for(base_url: &str, download_dir: &Path, form: CorrectionForm) -> SubmissionController {
    let config = Config {
        download_dir: download_dir.display().to_string(),
        ..Config::with_server(base_url)
    };
    SubmissionController::from_config(&config, form).unwrap()
}

fn two_version_form(image: &Path) -> CorrectionForm {
    let mut form = CorrectionForm::new("2");
    form.professor_name = "Maria".to_string();
    form.exam_date = "2025-06-01".to_string();
    form.turma = "3A".to_string();
    form.add_image(image);

    let answers = form.answers_mut();
    answers.select_correct(1, q(1), Some(ChoiceLabel::A)).unwrap();
    answers.select_correct(2, q(1), Some(ChoiceLabel::C)).unwrap();
    answers.set_weight(2, q(1), 0.5).unwrap();
    form
}

fn text_of<'a>(fields: &'a [Received], name: &str) -> Option<&'a str> {
    fields
        .iter()
        .find(|f| f.name == name)
        .map(|f| std::str::from_utf8(&f.body).unwrap())
}

#[tokio::test]
async fn test_submit_downloads_result_and_resets_answers() {
    let (base_url, seen) = spawn_server(post(upload_ok)).await;
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("folha1.png");
    std::fs::write(&image, b"\x89PNG scan").unwrap();
    let downloads = dir.path().join("downloads");

    let mut controller = controller_for(&base_url, &downloads, two_version_form(&image));
    let result = controller.submit().await.unwrap();

    let expected_path = downloads.join("result.xlsx");
    assert_eq!(result, SubmissionResult::Downloaded(expected_path.clone()));
    assert_eq!(std::fs::read(&expected_path).unwrap(), RESULT_BYTES);

    let status = controller.status().current().unwrap();
    assert_eq!(status.text, MSG_CORRECTION_DONE);
    assert_eq!(status.kind, StatusKind::Success);
    assert_eq!(controller.status().history()[0].kind, StatusKind::Info);

    // 答案键被清空，图片保留
    let form = controller.form();
    assert_eq!(form.answers().correct_of(1, q(1)), Some(None));
    assert_eq!(form.answers().select_count(), 20);
    assert_eq!(form.images().len(), 1);

    let fields = seen.lock().await.clone();
    assert_eq!(text_of(&fields, "professor_name"), Some("Maria"));
    assert_eq!(text_of(&fields, "num_exam_types"), Some("2"));
    assert_eq!(text_of(&fields, "exam_answers_2_Q1_correct"), Some("C"));
    assert_eq!(text_of(&fields, "exam_answers_2_Q1_peso_questao"), Some("0.5"));

    let image_part = fields.iter().find(|f| f.name == "gabarito_images").unwrap();
    assert_eq!(image_part.file_name.as_deref(), Some("folha1.png"));
    assert_eq!(image_part.body, b"\x89PNG scan");

    let exam_answers: serde_json::Value =
        serde_json::from_str(text_of(&fields, "exam_answers").unwrap()).unwrap();
    assert_eq!(
        exam_answers["1"]["Q1"],
        json!({
            "peso_questao": 1.0,
            "pesos_alternativas": {"A": 1.0, "B": 0.0, "C": 0.0, "D": 0.0, "E": 0.0},
            "correta": "A"
        })
    );
    assert_eq!(
        exam_answers["2"]["Q1"],
        json!({
            "peso_questao": 0.5,
            "pesos_alternativas": {"A": 0.0, "B": 0.0, "C": 1.0, "D": 0.0, "E": 0.0},
            "correta": "C"
        })
    );

    let parsed = ExamAnswerKey::from_json(text_of(&fields, "exam_answers").unwrap()).unwrap();
    assert_eq!(parsed.exam_type_count(), 2);
    assert_eq!(parsed.questions(1).unwrap().len(), 10);
    assert_eq!(parsed.get(1, q(10)).unwrap().correct, None);
}

#[tokio::test]
async fn test_server_error_is_shown_verbatim() {
    let (base_url, _seen) = spawn_server(post(upload_missing_file)).await;
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("folha1.jpg");
    std::fs::write(&image, b"jpeg").unwrap();
    let downloads = dir.path().join("downloads");

    let mut controller = controller_for(&base_url, &downloads, two_version_form(&image));
    let result = controller.submit().await.unwrap();

    assert_eq!(result, SubmissionResult::ServerRejected("Missing file".to_string()));
    let status = controller.status().current().unwrap();
    assert_eq!(status.text, "Erro: Missing file");
    assert_eq!(status.kind, StatusKind::Error);
    assert_eq!(status.kind.color(), "red");

    // 失败时不重新生成
    assert_eq!(
        controller.form().answers().correct_of(1, q(1)),
        Some(Some(ChoiceLabel::A))
    );
    assert!(!downloads.exists());
}

#[tokio::test]
async fn test_unreachable_server_shows_generic_message() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_for(
        &format!("http://{}", addr),
        dir.path(),
        CorrectionForm::new("1"),
    );
    let result = controller.submit().await.unwrap();

    assert_eq!(result, SubmissionResult::Unreachable);
    let status = controller.status().current().unwrap();
    assert_eq!(status.text, MSG_CONNECTION_ERROR);
    assert_eq!(status.kind, StatusKind::Error);
}

#[tokio::test]
async fn test_missing_disposition_uses_default_name() {
    let (base_url, seen) = spawn_server(post(upload_no_disposition)).await;
    let dir = tempfile::tempdir().unwrap();

    let mut controller = controller_for(&base_url, dir.path(), CorrectionForm::new("0"));
    let result = controller.submit().await.unwrap();

    assert_eq!(
        result,
        SubmissionResult::Downloaded(dir.path().join("resultados.xlsx"))
    );

    // 数量无效时答案键为空对象
    let fields = seen.lock().await.clone();
    assert_eq!(text_of(&fields, "exam_answers"), Some("{}"));
    assert!(!fields.iter().any(|f| f.name.starts_with("exam_answers_")));
}

#[tokio::test]
async fn test_unreadable_image_fails_before_request() {
    let (base_url, seen) = spawn_server(post(upload_ok)).await;
    let dir = tempfile::tempdir().unwrap();

    let mut form = CorrectionForm::new("1");
    form.add_image(dir.path().join("missing.png"));
    let mut controller = controller_for(&base_url, dir.path(), form);

    assert!(controller.submit().await.is_err());
    let status = controller.status().current().unwrap();
    assert!(status.text.starts_with("Erro: "));
    assert_eq!(status.kind, StatusKind::Error);
    assert!(seen.lock().await.is_empty());
}

#[tokio::test]
async fn test_fetch_template() {
    let (base_url, _seen) = spawn_server(post(upload_ok)).await;
    let dir = tempfile::tempdir().unwrap();
    let mut controller = controller_for(&base_url, dir.path(), CorrectionForm::new("1"));

    let result = controller.fetch_template("modelo.pdf").await.unwrap();
    assert_eq!(result, SubmissionResult::Downloaded(dir.path().join("modelo.pdf")));

    let result = controller.fetch_template("outro.pdf").await.unwrap();
    assert_eq!(
        result,
        SubmissionResult::ServerRejected("Arquivo não encontrado.".to_string())
    );
}

#[tokio::test]
async fn test_app_runs_from_fill_file() {
    let (base_url, seen) = spawn_server(post(upload_ok)).await;
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("scan.jpeg");
    std::fs::write(&image, b"jpeg bytes").unwrap();

    let form_file = dir.path().join("answer_key.toml");
    std::fs::write(
        &form_file,
        format!(
            r#"
professor_name = "Ana"
exam_date = "2025-06-01"
turma = "2B"
num_exam_types = 1
gabarito_images = [{image:?}]

[[answers]]
exam_type = 1
question = "Q4"
correta = "D"
peso_questao = 2.0
"#,
            image = image.display().to_string()
        ),
    )
    .unwrap();

    let config = Config {
        form_file: form_file.display().to_string(),
        download_dir: dir.path().join("out").display().to_string(),
        output_log_file: dir.path().join("output.txt").display().to_string(),
        ..Config::with_server(&base_url)
    };

    let result = App::initialize(config).await.unwrap().run().await.unwrap();
    assert!(result.is_success());

    let fields = seen.lock().await.clone();
    let key = ExamAnswerKey::from_json(text_of(&fields, "exam_answers").unwrap()).unwrap();
    let entry = key.get(1, q(4)).unwrap();
    assert_eq!(entry.correct, Some(ChoiceLabel::D));
    assert_eq!(entry.question_weight, 2.0);

    let log = std::fs::read_to_string(dir.path().join("output.txt")).unwrap();
    assert!(log.contains(MSG_CORRECTION_DONE));
}

#[tokio::test]
async fn test_app_uses_configured_count_when_fill_has_none() {
    let (base_url, seen) = spawn_server(post(upload_ok)).await;
    let dir = tempfile::tempdir().unwrap();
    let image = dir.path().join("scan.png");
    std::fs::write(&image, b"png bytes").unwrap();

    let form_file = dir.path().join("answer_key.toml");
    std::fs::write(
        &form_file,
        format!(
            "professor_name = \"Ana\"\ngabarito_images = [{:?}]\n",
            image.display().to_string()
        ),
    )
    .unwrap();

    let config = Config {
        form_file: form_file.display().to_string(),
        default_exam_types: "3".to_string(),
        download_dir: dir.path().join("out").display().to_string(),
        output_log_file: dir.path().join("output.txt").display().to_string(),
        ..Config::with_server(&base_url)
    };

    let result = App::initialize(config).await.unwrap().run().await.unwrap();
    assert!(result.is_success());

    let fields = seen.lock().await.clone();
    assert_eq!(text_of(&fields, "num_exam_types"), Some("3"));
    let key = ExamAnswerKey::from_json(text_of(&fields, "exam_answers").unwrap()).unwrap();
    assert_eq!(key.exam_type_count(), 3);
}

#[tokio::test]
async fn test_app_logs_error_status_when_submit_fails() {
    let (base_url, seen) = spawn_server(post(upload_ok)).await;
    let dir = tempfile::tempdir().unwrap();

    let form_file = dir.path().join("answer_key.toml");
    let missing = dir.path().join("missing.png");
    std::fs::write(
        &form_file,
        format!("gabarito_images = [{:?}]\n", missing.display().to_string()),
    )
    .unwrap();

    let log_path = dir.path().join("output.txt");
    let config = Config {
        form_file: form_file.display().to_string(),
        download_dir: dir.path().join("out").display().to_string(),
        output_log_file: log_path.display().to_string(),
        ..Config::with_server(&base_url)
    };

    let app = App::initialize(config).await.unwrap();
    assert!(app.run().await.is_err());
    assert!(seen.lock().await.is_empty());

    let log = std::fs::read_to_string(&log_path).unwrap();
    assert!(log.contains("Erro: "));
}
