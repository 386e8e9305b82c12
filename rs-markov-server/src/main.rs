use std::path::{Path, PathBuf};
use std::sync::Mutex;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{get, put, web, App, HttpResponse, HttpServer, Responder};
use log::{info, warn};
use serde::Deserialize;

use rs_markov_core::config::{ModelConfig, DEFAULT_WINDOW_LENGTH};
use rs_markov_core::io::list_files;
use rs_markov_core::model::language_model::LanguageModel;

const CORPUS_EXTENSION: &str = "txt";
const DEFAULT_LENGTH: usize = 100;
const MAX_LENGTH: usize = 100_000;

/// Query parameters of the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	initial: Option<String>,
	length: Option<usize>,
}

/// Query parameters of the `/v1/train` endpoint
#[derive(Deserialize)]
struct TrainParams {
	name: Option<String>,
	window_length: Option<usize>,
	seed: Option<u64>,
}

/// Trained model and the name of the corpus it was built from.
///
/// Kept behind a `Mutex`: sampling advances the model's random source.
#[derive(Default)]
struct SharedData {
	model: Option<LanguageModel>,
	corpus: Option<String>,
}

/// Folder holding the `*.txt` corpora.
struct DataFolder(PathBuf);

impl TrainParams {
	/// Validated corpus name: non-empty and without path components.
	fn corpus_name(&self) -> Result<&str, String> {
		match &self.name {
			Some(s) if !s.trim().is_empty() => {
				let name = s.trim();
				if name.contains(['/', '\\']) || name.starts_with('.') {
					Err(format!("Invalid corpus name: {name}"))
				} else {
					Ok(name)
				}
			}
			_ => Err("Missing or empty corpus name".into()),
		}
	}

	fn model_config(&self) -> Result<ModelConfig, String> {
		ModelConfig::new(self.window_length.unwrap_or(DEFAULT_WINDOW_LENGTH), self.seed).map_err(|e| e.to_string())
	}
}

/// HTTP GET endpoint `/v1/generate`
///
/// Extends `initial` by up to `length` characters with the trained model.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<Mutex<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let initial = match &query.initial {
		Some(s) => s.as_str(),
		None => return HttpResponse::BadRequest().body("Missing initial text"),
	};
	let length = query.length.unwrap_or(DEFAULT_LENGTH);
	if length > MAX_LENGTH {
		return HttpResponse::BadRequest().body(format!("Length must be at most {MAX_LENGTH}"));
	}

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};

	match shared_data.model.as_mut() {
		Some(model) => HttpResponse::Ok().body(model.generate(initial, length)),
		None => HttpResponse::Conflict().body("No model trained"),
	}
}

/// HTTP GET endpoint `/v1/corpora`
///
/// Lists the corpus names available for training.
#[get("/v1/corpora")]
async fn get_corpora(folder: web::Data<DataFolder>) -> impl Responder {
	match list_files(&folder.0, CORPUS_EXTENSION) {
		Ok(files) => HttpResponse::Ok().body(files.join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list corpora"),
	}
}

/// HTTP GET endpoint `/v1/model`
///
/// Human-readable dump of the trained table.
#[get("/v1/model")]
async fn get_model(data: web::Data<Mutex<SharedData>>) -> impl Responder {
	let shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match (&shared_data.model, &shared_data.corpus) {
		(Some(model), Some(corpus)) => HttpResponse::Ok().body(format!("# {corpus}\n{model}")),
		_ => HttpResponse::Conflict().body("No model trained"),
	}
}

/// HTTP PUT endpoint `/v1/train`
///
/// Replaces the shared model with one trained on `<data>/<name>.txt`.
#[put("/v1/train")]
async fn put_train(
	data: web::Data<Mutex<SharedData>>,
	folder: web::Data<DataFolder>,
	query: web::Query<TrainParams>,
) -> impl Responder {
	let name = match query.corpus_name() {
		Ok(name) => name,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};
	let config = match query.model_config() {
		Ok(config) => config,
		Err(e) => return HttpResponse::BadRequest().body(e),
	};

	let corpus_path = corpus_path(&folder.0, name);
	if !corpus_path.is_file() {
		return HttpResponse::NotFound().body(format!("Unknown corpus: {name}"));
	}

	let mut model = match LanguageModel::new(&config) {
		Ok(model) => model,
		Err(e) => return HttpResponse::BadRequest().body(e.to_string()),
	};
	if let Err(e) = model.train_file(&corpus_path) {
		warn!("failed to train on {}: {}", corpus_path.display(), e);
		return HttpResponse::InternalServerError().body(format!("Failed to train model: {e}"));
	}

	let mut shared_data = match data.lock() {
		Ok(m) => m,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let windows = model.table().len();
	shared_data.model = Some(model);
	shared_data.corpus = Some(name.to_owned());
	info!("model trained on '{}' ({} windows)", name, windows);

	HttpResponse::Ok().body(format!("Model trained on '{name}' ({windows} windows)"))
}

fn corpus_path(folder: &Path, name: &str) -> PathBuf {
	folder.join(format!("{name}.{CORPUS_EXTENSION}"))
}

/// Main entry point for the server.
///
/// Serves corpora from `./data` on 127.0.0.1:5000. The model is shared
/// behind a `Mutex` across workers.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

	let shared_model = web::Data::new(Mutex::new(SharedData::default()));
	let data_folder = web::Data::new(DataFolder(PathBuf::from("./data")));

	info!("listening on 127.0.0.1:5000");
	HttpServer::new(move || {
		App::new()
			.wrap(Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_model.clone())
			.app_data(data_folder.clone())
			.service(get_generated)
			.service(get_corpora)
			.service(get_model)
			.service(put_train)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;
	use actix_web::http::StatusCode;
	use actix_web::test;

	macro_rules! service {
		($folder:expr) => {
			test::init_service(
				App::new()
					.app_data(web::Data::new(Mutex::new(SharedData::default())))
					.app_data(web::Data::new(DataFolder($folder)))
					.service(get_generated)
					.service(get_corpora)
					.service(get_model)
					.service(put_train),
			)
			.await
		};
	}

	#[actix_web::test]
	async fn generate_requires_a_trained_model() {
		let app = service!(PathBuf::from("."));
		let req = test::TestRequest::get().uri("/v1/generate?initial=abc&length=5").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::CONFLICT);
	}

	#[actix_web::test]
	async fn generate_rejects_oversized_length() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("loop.txt"), "abababab").unwrap();
		let app = service!(dir.path().to_path_buf());

		let req = test::TestRequest::put().uri("/v1/train?name=loop&window_length=1").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

		let req = test::TestRequest::get().uri("/v1/generate?initial=a&length=10000000000").to_request();
		assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

		let req = test::TestRequest::get().uri("/v1/generate?initial=a&length=100000").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert_eq!(body.len(), 100_001);
	}

	#[actix_web::test]
	async fn train_rejects_bad_requests() {
		let dir = tempfile::tempdir().unwrap();
		let app = service!(dir.path().to_path_buf());

		for uri in ["/v1/train", "/v1/train?name=..%2Fetc", "/v1/train?name=x&window_length=0"] {
			let req = test::TestRequest::put().uri(uri).to_request();
			let resp = test::call_service(&app, req).await;
			assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");
		}

		let req = test::TestRequest::put().uri("/v1/train?name=missing").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::NOT_FOUND);
	}

	#[actix_web::test]
	async fn train_then_generate() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("abc.txt"), "aabcaabcaabc").unwrap();
		let app = service!(dir.path().to_path_buf());

		let req = test::TestRequest::get().uri("/v1/corpora").to_request();
		assert_eq!(test::call_and_read_body(&app, req).await, "abc");

		let req = test::TestRequest::put().uri("/v1/train?name=abc&window_length=2&seed=42").to_request();
		let resp = test::call_service(&app, req).await;
		assert_eq!(resp.status(), StatusCode::OK);

		let req = test::TestRequest::get().uri("/v1/generate?initial=aa&length=4").to_request();
		assert_eq!(test::call_and_read_body(&app, req).await, "aabcaa");

		let req = test::TestRequest::get().uri("/v1/model").to_request();
		let body = test::call_and_read_body(&app, req).await;
		assert!(body.starts_with(b"# abc\naa : (b 3 1 1)\n"));
	}
}
