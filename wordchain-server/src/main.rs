use std::io;

use actix_cors::Cors;
use actix_web::{get, middleware, web, App, HttpResponse, HttpServer, Responder};
use log::{info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use wordchain_core::{ModelError, StartSeed, TransitionModel};

use crate::config::ServerConfig;

mod config;

/// Default number of generation steps when `steps` is omitted.
const DEFAULT_STEPS: usize = 5;

/// Upper bound on `steps` accepted by `/v1/generate`.
const MAX_STEPS: usize = 1_000;

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	steps: Option<usize>,
	rng_seed: Option<u64>,
	seed: Option<String> // -> random, custom(str) or none (random)
}

#[derive(Deserialize)]
struct ContextQuery {
	context: Option<String>,
	rng_seed: Option<u64>
}

#[derive(Deserialize)]
struct RngQuery {
	rng_seed: Option<u64>
}

#[derive(Serialize)]
struct DistributionBody<'a> {
	context: &'a str,
	successors: &'a [String],
	probabilities: &'a [f64],
}

#[derive(Serialize)]
struct GenerateBody {
	tokens: Vec<String>,
	text: String,
}

/// The model is read-only after startup, so workers share it without a lock.
struct SharedData {
	model: TransitionModel
}

impl GenerateParams {
	/// Determines the starting seed strategy for sequence generation.
	fn start_seed(&self) -> Result<StartSeed, String> {
		match &self.seed {
			None => Ok(StartSeed::Random),
			Some(s) if s.eq_ignore_ascii_case("none") || s.eq_ignore_ascii_case("random") => Ok(StartSeed::Random),
			Some(s) if s.to_lowercase().starts_with("custom:") => {
				let value = s["custom:".len()..].trim();
				if value.is_empty() {
					Err("Custom seed cannot be empty".into())
				} else {
					Ok(StartSeed::Custom(value.to_owned()))
				}
			}
			Some(_) => Err("Seed must start with 'custom:' or be 'random' or 'none'".into()),
		}
	}
}

/// Per-request random source: deterministic when `rng_seed` is given.
fn make_rng(rng_seed: Option<u64>) -> StdRng {
	match rng_seed {
		Some(seed) => StdRng::seed_from_u64(seed),
		None => StdRng::from_rng(&mut rand::rng()),
	}
}

/// Extracts a non-blank `context` parameter.
fn required_context(query: &ContextQuery) -> Result<&str, HttpResponse> {
	match &query.context {
		Some(s) if !s.trim().is_empty() => Ok(s.trim()),
		_ => Err(HttpResponse::BadRequest().body("Missing or empty context")),
	}
}

/// GET /v1/generate
///
/// Generates a sentence from a custom or random seed token.
/// Returns the tokens and the space-joined text as JSON.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<SharedData>, query: web::Query<GenerateParams>) -> impl Responder {
	let steps = query.steps.unwrap_or(DEFAULT_STEPS);
	if steps > MAX_STEPS {
		return HttpResponse::BadRequest().body(format!("steps must be at most {}", MAX_STEPS));
	}

	let start_seed = match query.start_seed() {
		Ok(s) => s,
		Err(e) => return HttpResponse::BadRequest().body(e)
	};

	let mut rng = make_rng(query.rng_seed);
	let seed = match data.model.resolve_seed(&start_seed, &mut rng) {
		Some(seed) => seed,
		None => return HttpResponse::NotFound().body("No seed available for generation")
	};

	let tokens = data.model.generate_tokens(&seed, steps, &mut rng);
	let text = tokens.join(" ");
	HttpResponse::Ok().json(GenerateBody { tokens, text })
}

/// GET /v1/distribution
///
/// Learned successors of a context with their probabilities.
/// An unknown context returns empty lists.
#[get("/v1/distribution")]
async fn get_distribution(data: web::Data<SharedData>, query: web::Query<ContextQuery>) -> impl Responder {
	let context = match required_context(&query) {
		Ok(c) => c,
		Err(response) => return response
	};

	let distribution = data.model.get_distribution(context);
	HttpResponse::Ok().json(DistributionBody {
		context,
		successors: distribution.successors(),
		probabilities: distribution.probabilities(),
	})
}

/// GET /v1/next
///
/// One successor of a context drawn with the learned weights.
/// `rng_seed` makes the draw deterministic.
#[get("/v1/next")]
async fn get_next(data: web::Data<SharedData>, query: web::Query<ContextQuery>) -> impl Responder {
	let context = match required_context(&query) {
		Ok(c) => c,
		Err(response) => return response
	};

	let mut rng = make_rng(query.rng_seed);
	match data.model.sample_weighted(context, &mut rng) {
		Ok(next) => HttpResponse::Ok().body(next),
		Err(e @ ModelError::UnknownContext(_)) => HttpResponse::NotFound().body(e.to_string()),
		Err(e) => {
			warn!("Weighted sampling failed: {}", e);
			HttpResponse::InternalServerError().body(e.to_string())
		}
	}
}

/// GET /v1/naive
///
/// One vocabulary token drawn uniformly, ignoring context.
#[get("/v1/naive")]
async fn get_naive(data: web::Data<SharedData>, query: web::Query<RngQuery>) -> impl Responder {
	let mut rng = make_rng(query.rng_seed);
	match data.model.sample_vocabulary(&mut rng) {
		Ok(token) => HttpResponse::Ok().body(token.to_owned()),
		Err(e) => HttpResponse::NotFound().body(e.to_string()),
	}
}

/// GET /v1/vocabulary
///
/// Every distinct training token in first-seen order, one per line.
#[get("/v1/vocabulary")]
async fn get_vocabulary(data: web::Data<SharedData>) -> impl Responder {
	HttpResponse::Ok().body(data.model.vocabulary().join("\n"))
}

/// Registers every endpoint.
fn routes(cfg: &mut web::ServiceConfig) {
	cfg.service(get_generated)
		.service(get_distribution)
		.service(get_next)
		.service(get_naive)
		.service(get_vocabulary);
}

/// Main entry point for the server.
///
/// Builds the transition model once from the configured corpus and serves
/// read-only queries on it.
///
/// # Notes
/// - Binds to `WORDCHAIN_HOST:WORDCHAIN_PORT` (127.0.0.1:5000 by default).
/// - Set `RUST_LOG=info` to see request logs.
#[actix_web::main]
async fn main() -> io::Result<()> {
	env_logger::init();

	let config = ServerConfig::from_env().map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))?;
	let corpus = config.load_corpus().map_err(io::Error::other)?;
	let model = TransitionModel::build(&corpus);
	info!(
		"Model ready: {} contexts, {} tokens",
		model.len(),
		model.vocabulary().len()
	);

	let shared_data = web::Data::new(SharedData { model });

	info!("Listening on {}:{}", config.host, config.port);
	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.configure(routes)
	})
		.bind((config.host.as_str(), config.port))?
		.run()
		.await
}
