// SPDX-License-Identifier: Apache-2.0

use std::ffi::OsString;
use std::fs;
use std::io::{ErrorKind, Write as _};
use std::path::{Path, PathBuf};

use serde_json::json;
use sorteiaki_core::{resolve_results_dir, ErrorCode, SystemClock, ENV_SORTEIAKI_ACCESS_TOKEN};
use sorteiaki_engine::{
    draw_now, filter_participants, parse_manual_list, record_digest, verify_result, DrawOutcome,
    RaffleSession,
};
use sorteiaki_model::{MediaId, MediaItem, Participant, RaffleResult, RaffleSettings, RaffleSource};
use sorteiaki_provider::{
    participants_or_empty, DemoProvider, EngagementProvider, FixtureProvider, GraphApiProvider,
};
use tracing::{info, warn};

use crate::config::{load_config, FileConfig};
use crate::reveal::{self, Presentation};
use crate::{emit_ok, CliError, DrawArgs, DrawSource, OutputMode, SettingsArgs};

fn runtime() -> Result<tokio::runtime::Runtime, CliError> {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::internal)
}

fn resolve_settings(args: &SettingsArgs, config: &FileConfig) -> Result<RaffleSettings, CliError> {
    let mut settings = config.raffle_settings();
    if let Some(winners) = args.winners {
        settings.winners_count = winners;
    }
    if let Some(engagement) = args.engagement {
        settings.engagement_type = engagement.into();
    }
    if let Some(min_mentions) = args.min_mentions {
        settings.min_mentions = min_mentions;
    }
    if let Some(keyword) = &args.keyword {
        settings.required_keyword.clone_from(keyword);
    }
    if args.allow_duplicates {
        settings.allow_duplicates = true;
    }
    if settings.winners_count == 0 {
        warn!("winners_count 0 raised to 1");
        settings.winners_count = 1;
    }
    settings.validate().map_err(CliError::validation)?;
    Ok(settings)
}

fn read_names(path: &Path) -> Result<String, CliError> {
    if path.as_os_str() == "-" {
        return std::io::read_to_string(std::io::stdin())
            .map_err(|e| CliError::usage(format!("failed to read names from stdin: {e}")));
    }
    fs::read_to_string(path)
        .map_err(|e| CliError::usage(format!("failed to read {}: {e}", path.display())))
}

fn digest_path(out: &Path) -> PathBuf {
    let mut name = OsString::from(out.as_os_str());
    name.push(".sha256");
    PathBuf::from(name)
}

/// Replaces `path` with `bytes` through a synced temp file and a rename.
fn write_atomic(path: &Path, bytes: &[u8]) -> Result<(), CliError> {
    let fail =
        |e: std::io::Error| CliError::internal(format!("failed to write {}: {e}", path.display()));
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .map_err(|e| CliError::internal(format!("failed to create {}: {e}", parent.display())))?;
    let file_name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("result");
    let tmp = parent.join(format!(".{file_name}.tmp.{}", std::process::id()));
    {
        let mut file = fs::File::create(&tmp).map_err(fail)?;
        file.write_all(bytes).map_err(fail)?;
        file.sync_all().map_err(fail)?;
    }
    fs::rename(&tmp, path).map_err(|e| {
        let _ = fs::remove_file(&tmp);
        fail(e)
    })
}

// The digest lands first: a record never sits on disk without one.
fn write_result(out: &Path, result: &RaffleResult, digest: &str) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(result).map_err(CliError::internal)?;
    write_atomic(&digest_path(out), format!("{digest}\n").as_bytes())?;
    write_atomic(out, format!("{text}\n").as_bytes())
}

fn provider_for_fixture(root: PathBuf, config: &FileConfig) -> Box<dyn EngagementProvider> {
    Box::new(FixtureProvider::new(root).with_credential(config.access_token()))
}

fn provider_for_graph(config: &FileConfig) -> Result<Box<dyn EngagementProvider>, CliError> {
    let provider = GraphApiProvider::new(config.graph_config(), config.access_token())
        .map_err(CliError::provider)?;
    Ok(Box::new(provider))
}

/// Connects, finds the requested post and pulls its pool.
///
/// A failed participant fetch degrades to an empty pool. An engagement
/// type the provider cannot serve, or a pool cut short by the page cap, is
/// reported as an error.
fn fetch_platform_pool(
    provider: &dyn EngagementProvider,
    media: &str,
    settings: &RaffleSettings,
    session: &mut RaffleSession,
) -> Result<(MediaItem, Vec<Participant>), CliError> {
    let media_id = MediaId::parse(media).map_err(CliError::validation)?;
    session.begin_connect().map_err(CliError::internal)?;
    runtime()?.block_on(async {
        let credential = provider
            .authenticate()
            .await
            .map_err(CliError::provider)?
            .ok_or_else(|| {
                CliError::usage(format!(
                    "no access token available; set {ENV_SORTEIAKI_ACCESS_TOKEN}"
                ))
            })?;
        let listed = provider
            .list_media(&credential)
            .await
            .map_err(CliError::provider)?;
        session.media_listed().map_err(CliError::internal)?;
        let item = listed
            .into_iter()
            .find(|m| m.id == media_id)
            .ok_or_else(|| {
                CliError::validation(format!(
                    "media `{media_id}` is not listed by the {} provider",
                    provider.provider_tag()
                ))
            })?;
        let fetched = provider
            .fetch_participants(&item.id, settings.engagement_type, &credential)
            .await;
        let raw = match fetched {
            Err(err) if err.is_fatal_for_draw() => return Err(CliError::provider(err)),
            other => participants_or_empty(other),
        };
        Ok::<_, CliError>((item, raw))
    })
}

pub(crate) fn run_draw(
    source: DrawSource,
    output_mode: OutputMode,
    presentation: Presentation,
) -> Result<(), CliError> {
    let (config, _) = load_config().map_err(CliError::config)?;
    match source {
        DrawSource::Manual { names, draw } => {
            let settings = resolve_settings(&draw.settings, &config)?;
            let raw = parse_manual_list(&read_names(&names)?);
            let mut session = RaffleSession::new(draw.countdown.unwrap_or(config.countdown_ticks()));
            complete_draw(
                &mut session,
                &RaffleSource::Manual,
                &raw,
                &settings,
                &draw,
                "manual",
                output_mode,
                presentation,
            )
        }
        DrawSource::Fixture { root, media, draw } => {
            let provider = provider_for_fixture(root, &config);
            draw_from_provider(provider.as_ref(), &media, &draw, &config, output_mode, presentation)
        }
        DrawSource::Graph { media, draw } => {
            let provider = provider_for_graph(&config)?;
            draw_from_provider(provider.as_ref(), &media, &draw, &config, output_mode, presentation)
        }
        DrawSource::Demo { media, draw } => {
            draw_from_provider(&DemoProvider, &media, &draw, &config, output_mode, presentation)
        }
    }
}

fn draw_from_provider(
    provider: &dyn EngagementProvider,
    media: &str,
    draw: &DrawArgs,
    config: &FileConfig,
    output_mode: OutputMode,
    presentation: Presentation,
) -> Result<(), CliError> {
    let settings = resolve_settings(&draw.settings, config)?;
    let mut session = RaffleSession::new(draw.countdown.unwrap_or(config.countdown_ticks()));
    let (item, raw) = fetch_platform_pool(provider, media, &settings, &mut session)?;
    complete_draw(
        &mut session,
        &RaffleSource::Platform { media: item },
        &raw,
        &settings,
        draw,
        provider.provider_tag(),
        output_mode,
        presentation,
    )
}

#[allow(clippy::too_many_arguments)]
fn complete_draw(
    session: &mut RaffleSession,
    source: &RaffleSource,
    raw: &[Participant],
    settings: &RaffleSettings,
    draw: &DrawArgs,
    label: &str,
    output_mode: OutputMode,
    presentation: Presentation,
) -> Result<(), CliError> {
    session.begin_processing().map_err(CliError::internal)?;
    let outcome = draw_now(source, raw, settings).map_err(CliError::internal)?;
    let (raw_count, eligible_count) = match &outcome {
        DrawOutcome::NoEligibleParticipants { raw_count } => (*raw_count, 0),
        DrawOutcome::Drawn {
            raw_count,
            eligible_count,
            ..
        } => (*raw_count, *eligible_count),
    };
    session
        .finish_processing(outcome)
        .map_err(CliError::internal)?;
    let Some(result) = session.result().cloned() else {
        return Err(CliError::new(
            ErrorCode::NoEligibleParticipants,
            "no eligible participants",
        )
        .with_detail("raw_count", raw_count)
        .with_detail("source", label));
    };

    reveal::present(session, &SystemClock, presentation).map_err(CliError::internal)?;
    let digest = record_digest(&result).map_err(CliError::internal)?;
    let out = draw.out.clone().or_else(|| {
        draw.save
            .then(|| resolve_results_dir().join(format!("{}.json", result.id())))
    });
    if let Some(out) = &out {
        write_result(out, &result, &digest)?;
        info!(path = %out.display(), "result record written");
    }
    emit_ok(
        output_mode,
        &json!({
            "command": "draw",
            "source": label,
            "raw_count": raw_count,
            "eligible_count": eligible_count,
            "record_digest": digest,
            "out": out,
            "result": result,
        }),
    )?;
    session.reset().map_err(CliError::internal)
}

pub(crate) fn run_media_list(
    root: Option<PathBuf>,
    graph: bool,
    demo: bool,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let (config, _) = load_config().map_err(CliError::config)?;
    let provider: Box<dyn EngagementProvider> = match (root, graph, demo) {
        (Some(root), _, _) => provider_for_fixture(root, &config),
        (None, true, _) => provider_for_graph(&config)?,
        (None, false, true) => Box::new(DemoProvider),
        (None, false, false) => {
            return Err(CliError::usage("one of --root, --graph or --demo is required"))
        }
    };
    let media = runtime()?.block_on(async {
        let credential = provider
            .authenticate()
            .await
            .map_err(CliError::provider)?
            .ok_or_else(|| {
                CliError::usage(format!(
                    "no access token available; set {ENV_SORTEIAKI_ACCESS_TOKEN}"
                ))
            })?;
        provider
            .list_media(&credential)
            .await
            .map_err(CliError::provider)
    })?;
    emit_ok(
        output_mode,
        &json!({
            "command": "media list",
            "provider": provider.provider_tag(),
            "media": media,
        }),
    )
}

pub(crate) fn run_filter(
    participants: &Path,
    args: &SettingsArgs,
    output_mode: OutputMode,
) -> Result<(), CliError> {
    let (config, _) = load_config().map_err(CliError::config)?;
    let settings = resolve_settings(args, &config)?;
    let bytes = fs::read(participants).map_err(|e| {
        CliError::usage(format!("failed to read {}: {e}", participants.display()))
    })?;
    let raw: Vec<Participant> = serde_json::from_slice(&bytes).map_err(|e| {
        CliError::validation(format!("invalid participant file {}: {e}", participants.display()))
    })?;
    let eligible = filter_participants(&raw, &settings);
    emit_ok(
        output_mode,
        &json!({
            "command": "filter",
            "settings": settings,
            "raw_count": raw.len(),
            "eligible_count": eligible.len(),
            "eligible": eligible,
        }),
    )
}

pub(crate) fn run_verify(path: &Path, output_mode: OutputMode) -> Result<(), CliError> {
    let bytes = fs::read(path)
        .map_err(|e| CliError::usage(format!("failed to read {}: {e}", path.display())))?;
    let result: RaffleResult = serde_json::from_slice(&bytes).map_err(|e| {
        CliError::validation(format!("invalid result record {}: {e}", path.display()))
    })?;
    let report = verify_result(&result).map_err(CliError::internal)?;
    let sidecar = digest_path(path);
    let digest_file_matches = match fs::read_to_string(&sidecar) {
        Ok(stored) => Some(stored.trim() == report.record_digest),
        Err(e) if e.kind() == ErrorKind::NotFound => None,
        Err(e) => {
            return Err(CliError::usage(format!(
                "failed to read digest file {}: {e}",
                sidecar.display()
            ))
            .with_detail("digest_file", sidecar.display()))
        }
    };
    emit_ok(
        output_mode,
        &json!({
            "command": "verify",
            "report": report,
            "digest_file_matches": digest_file_matches,
        }),
    )?;
    if !report.matches {
        return Err(CliError::new(
            ErrorCode::VerificationMismatch,
            "verification token does not match the winners",
        )
        .with_detail("stored", &report.stored_token)
        .with_detail("expected", &report.expected_token));
    }
    if digest_file_matches == Some(false) {
        return Err(CliError::new(
            ErrorCode::VerificationMismatch,
            "record digest does not match the stored digest file",
        )
        .with_detail("digest_file", sidecar.display()));
    }
    Ok(())
}
