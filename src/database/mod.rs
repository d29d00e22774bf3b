use crate::error::AppError;
use photo_gallery::{Session, SqliteTokenStore};
use std::path::{Path, PathBuf};

#[cfg(target_os = "android")]
use jni::objects::JObject;
#[cfg(target_os = "android")]
use jni::JNIEnv;
#[cfg(target_os = "android")]
use ndk_context::android_context;

/// File name of the session database inside the data directory
pub const SESSION_DB_FILE: &str = "session.db";

/// Returns the app directory (config file, session database)
#[cfg(target_os = "android")]
pub fn get_app_directory() -> Result<PathBuf, AppError> {
    android_files_dir()
}

#[cfg(not(target_os = "android"))]
pub fn get_app_directory() -> Result<PathBuf, AppError> {
    Ok(PathBuf::from("./data"))
}

/// Path of the session database below `data_dir`
pub fn session_database_path(data_dir: &Path) -> PathBuf {
    data_dir.join(SESSION_DB_FILE)
}

#[cfg(target_os = "android")]
fn android_files_dir() -> Result<PathBuf, AppError> {
    use jni::JavaVM;

    let vm_ptr = android_context().vm() as *mut jni::sys::JavaVM;

    let vm = unsafe { JavaVM::from_raw(vm_ptr) }
        .map_err(|e| AppError::Platform(format!("JavaVM creation failed: {}", e)))?;

    let mut env = vm
        .attach_current_thread()
        .map_err(|e| AppError::Platform(format!("Failed to attach thread: {}", e)))?;

    let context_ptr = android_context().context();
    let context = unsafe { JObject::from_raw(context_ptr as jni::sys::jobject) };

    get_files_dir(&mut env, &context)
}

#[cfg(target_os = "android")]
fn get_files_dir(env: &mut JNIEnv, context: &JObject) -> Result<PathBuf, AppError> {
    let file = env
        .call_method(context, "getFilesDir", "()Ljava/io/File;", &[])
        .map_err(|e| AppError::Platform(format!("getFilesDir failed: {}", e)))?;

    let file_obj = file
        .l()
        .map_err(|e| AppError::Platform(format!("Failed to get file object: {}", e)))?;

    let path_jstring = env
        .call_method(file_obj, "getAbsolutePath", "()Ljava/lang/String;", &[])
        .map_err(|e| AppError::Platform(format!("getAbsolutePath failed: {}", e)))?;

    let path_obj = path_jstring
        .l()
        .map_err(|e| AppError::Platform(format!("Failed to get path object: {}", e)))?;

    let path_str: String = env
        .get_string(&path_obj.into())
        .map_err(|e| AppError::Platform(format!("Failed to get string: {}", e)))?
        .into();

    Ok(PathBuf::from(path_str))
}

/// Opens the session database in `data_dir` and restores the stored token
pub fn open_session(data_dir: &Path) -> Result<Session, AppError> {
    std::fs::create_dir_all(data_dir)?;

    let db_path = session_database_path(data_dir);
    log::debug!("Opening session database at {}", db_path.display());
    let store = SqliteTokenStore::open(&db_path)?;
    let session = Session::init(store)?;

    log::info!(
        "Session restored ({})",
        if session.is_authenticated() {
            "logged in"
        } else {
            "logged out"
        }
    );
    Ok(session)
}
