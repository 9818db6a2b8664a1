//! HTTP 路由：只做参数解析、DTO 映射与状态码换算，业务都在 crates 里

use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::sync::Arc;

use ai_file_common::{AppConfig, FileManagerError};
use ai_file_domain::FileEntry;
use ai_file_engine::{dispatch_batches, AnalysisProvider, BatchProgressCb};
use ai_file_executor::{delete_file, delete_folder, move_file, move_folder};
use ai_file_storage::{file_metadata, list_drives, list_files, list_folders};
use serde::Serialize;
use tiny_http::{Header, Method, Request, Response, StatusCode};

use crate::dto::{DriveInfoDto, FileInfoDto, FolderInfoDto};

type JsonResponse = Response<Cursor<Vec<u8>>>;

pub fn handle(
    mut request: Request,
    config: &AppConfig,
    provider: &Arc<dyn AnalysisProvider>,
    handle: &tokio::runtime::Handle,
) {
    let response = route(&mut request, config, provider, handle);
    if let Err(e) = request.respond(response) {
        log::warn!("failed to send response: {}", e);
    }
}

fn route(
    request: &mut Request,
    config: &AppConfig,
    provider: &Arc<dyn AnalysisProvider>,
    handle: &tokio::runtime::Handle,
) -> JsonResponse {
    let url = request.url().to_string();
    let (path, query) = url.split_once('?').unwrap_or((url.as_str(), ""));
    let params = parse_query(query);
    let method = request.method().clone();
    log::debug!("{} {}", method, path);

    match (method, path) {
        (Method::Get, "/api/storage/drives") => {
            let drives: Vec<DriveInfoDto> = list_drives().iter().map(DriveInfoDto::from).collect();
            json_ok(&drives)
        }
        (Method::Get, "/api/storage/folders") => match require(&params, "path") {
            Ok(p) => match list_folders(p, flag(&params, "deep")) {
                Ok(folders) => {
                    json_ok(&folders.iter().map(FolderInfoDto::from).collect::<Vec<_>>())
                }
                Err(e) => error_response(&e),
            },
            Err(resp) => resp,
        },
        (Method::Get, "/api/storage/files") => match require(&params, "path") {
            Ok(p) => match list_files(p, flag(&params, "deep")) {
                Ok(files) => json_ok(&files.iter().map(FileInfoDto::from).collect::<Vec<_>>()),
                Err(e) => error_response(&e),
            },
            Err(resp) => resp,
        },
        (Method::Get, "/api/storage/metadata") => match require(&params, "path") {
            Ok(p) => match file_metadata(p, flag(&params, "deep")) {
                Ok(files) => json_ok(&files.iter().map(FileInfoDto::from).collect::<Vec<_>>()),
                Err(e) => error_response(&e),
            },
            Err(resp) => resp,
        },
        (Method::Delete, "/api/storage/file") => match require(&params, "path") {
            Ok(p) => json_ok(&delete_file(p, flag(&params, "permanent"))),
            Err(resp) => resp,
        },
        (Method::Delete, "/api/storage/folder") => match require(&params, "path") {
            Ok(p) => json_ok(&delete_folder(p, flag(&params, "permanent"))),
            Err(resp) => resp,
        },
        (Method::Post, "/api/storage/move-file") => {
            match (require(&params, "source"), require(&params, "destination")) {
                (Ok(source), Ok(destination)) => json_ok(&move_file(source, destination)),
                (Err(resp), _) | (_, Err(resp)) => resp,
            }
        }
        (Method::Post, "/api/storage/move-folder") => {
            match (require(&params, "source"), require(&params, "destination")) {
                (Ok(source), Ok(destination)) => json_ok(&move_folder(source, destination)),
                (Err(resp), _) | (_, Err(resp)) => resp,
            }
        }
        (Method::Post, "/api/analysis/analyze-batch") => {
            analyze_batch(request, &params, config, provider, handle)
        }
        (Method::Post, "/api/analysis/analyze-file") => analyze_file(request, provider, handle),
        _ => json_error(404, "no such route"),
    }
}

fn analyze_batch(
    request: &mut Request,
    params: &HashMap<String, String>,
    config: &AppConfig,
    provider: &Arc<dyn AnalysisProvider>,
    handle: &tokio::runtime::Handle,
) -> JsonResponse {
    let files: Vec<FileEntry> = match read_json_body(request) {
        Ok(files) => files,
        Err(resp) => return resp,
    };
    if files.is_empty() {
        return json_error(400, "File list is empty.");
    }

    let batch_size = match params.get("batchSize") {
        Some(v) => match v.parse::<usize>() {
            Ok(n) => n,
            Err(_) => return json_error(400, "batchSize must be a positive integer"),
        },
        None => config.default_batch_size,
    };

    let progress: BatchProgressCb = Box::new(|ordinal| log::info!("Batch {} completed", ordinal));
    let result = handle.block_on(dispatch_batches(
        Arc::clone(provider),
        files,
        batch_size,
        config.max_in_flight_batches,
        Some(progress),
    ));
    match result {
        Ok(decisions) => json_ok(&decisions),
        Err(e) => error_response(&e),
    }
}

fn analyze_file(
    request: &mut Request,
    provider: &Arc<dyn AnalysisProvider>,
    handle: &tokio::runtime::Handle,
) -> JsonResponse {
    let file: FileEntry = match read_json_body(request) {
        Ok(file) => file,
        Err(resp) => return resp,
    };
    match handle.block_on(provider.analyze_file(&file)) {
        Ok(decision) => json_ok(&decision),
        Err(e) => error_response(&e),
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .filter_map(|pair| {
            let (k, v) = pair.split_once('=')?;
            Some((
                urlencoding::decode(k).ok()?.into_owned(),
                urlencoding::decode(v).ok()?.into_owned(),
            ))
        })
        .collect()
}

fn require<'a>(
    params: &'a HashMap<String, String>,
    key: &str,
) -> Result<&'a str, JsonResponse> {
    params
        .get(key)
        .map(|v| v.as_str())
        .ok_or_else(|| json_error(400, &format!("missing query parameter: {}", key)))
}

fn flag(params: &HashMap<String, String>, key: &str) -> bool {
    params
        .get(key)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false)
}

fn read_json_body<T: serde::de::DeserializeOwned>(
    request: &mut Request,
) -> Result<T, JsonResponse> {
    let mut body = String::new();
    if let Err(e) = request.as_reader().read_to_string(&mut body) {
        return Err(json_error(400, &format!("failed to read request body: {}", e)));
    }
    serde_json::from_str(&body).map_err(|e| json_error(400, &format!("invalid JSON body: {}", e)))
}

fn json_ok(body: &impl Serialize) -> JsonResponse {
    json_with_status(200, body)
}

fn json_error(status: u16, message: &str) -> JsonResponse {
    json_with_status(status, &serde_json::json!({ "error": message }))
}

fn json_with_status(status: u16, body: &impl Serialize) -> JsonResponse {
    let payload = serde_json::to_string(body).unwrap_or_else(|_| "{}".to_string());
    Response::from_string(payload)
        .with_status_code(StatusCode(status))
        .with_header(
            Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                .expect("static header"),
        )
}

fn error_response(e: &FileManagerError) -> JsonResponse {
    let status = match e {
        FileManagerError::InvalidArgument(_) => 400,
        FileManagerError::NotFound(_) => 404,
        FileManagerError::PermissionDenied(_) => 403,
        _ => 500,
    };
    json_error(status, &e.to_string())
}
