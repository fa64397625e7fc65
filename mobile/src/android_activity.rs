// Starting activities from the launcher via JNI: resolved launch intents,
// the app-details settings screen and the share sheet.

use crate::android_packagemanager::with_android_env;
use anyhow::{Context, Result};
use jni::objects::{GlobalRef, JClass, JObject, JString, JValue};
use jni::JNIEnv;
use std::path::Path;

const FLAG_GRANT_READ_URI_PERMISSION: i32 = 0x0000_0001;
const FLAG_ACTIVITY_NEW_TASK: i32 = 0x1000_0000;

fn start_activity(env: &mut JNIEnv, activity: &JObject, intent: &JObject) -> jni::errors::Result<()> {
    env.call_method(
        activity,
        "startActivity",
        "(Landroid/content/Intent;)V",
        &[JValue::Object(intent)],
    )?;
    Ok(())
}

/// Classes outside the framework (androidx) are only visible through the
/// app class loader, not from a natively attached thread.
fn load_app_class<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject,
    name: &str,
) -> jni::errors::Result<JClass<'local>> {
    let class_loader = env
        .call_method(activity, "getClassLoader", "()Ljava/lang/ClassLoader;", &[])?
        .l()?;
    let class_name = env.new_string(name)?;
    let class = env
        .call_method(
            &class_loader,
            "loadClass",
            "(Ljava/lang/String;)Ljava/lang/Class;",
            &[JValue::Object(&class_name)],
        )?
        .l()?;
    Ok(JClass::from(class))
}

pub fn start_intent(intent: &GlobalRef) -> Result<()> {
    with_android_env(|env, activity| start_activity(env, activity, intent.as_obj()))
        .context("Failed to start launch intent")
}

/// `Settings.ACTION_APPLICATION_DETAILS_SETTINGS` for `package:<id>`
pub fn open_app_details(package_id: &str) -> Result<()> {
    with_android_env(|env, activity| {
        let uri_string = env.new_string(format!("package:{}", package_id))?;
        let uri = env
            .call_static_method(
                "android/net/Uri",
                "parse",
                "(Ljava/lang/String;)Landroid/net/Uri;",
                &[JValue::Object(&uri_string)],
            )?
            .l()?;

        let action = env.new_string("android.settings.APPLICATION_DETAILS_SETTINGS")?;
        let intent = env.new_object(
            "android/content/Intent",
            "(Ljava/lang/String;Landroid/net/Uri;)V",
            &[JValue::Object(&action), JValue::Object(&uri)],
        )?;
        env.call_method(
            &intent,
            "setFlags",
            "(I)Landroid/content/Intent;",
            &[JValue::Int(FLAG_ACTIVITY_NEW_TASK)],
        )?;

        start_activity(env, activity, &intent)
    })
    .with_context(|| format!("Failed to open app details for {}", package_id))
}

/// Wraps `path` in a FileProvider URI and opens the chooser over an
/// `ACTION_SEND` intent granting read access to the receiver.
pub fn share_file(path: &Path, chooser_title: &str) -> Result<()> {
    let path_string = path
        .to_str()
        .with_context(|| format!("Non UTF-8 path {:?}", path))?;

    with_android_env(|env, activity| {
        let own_package = env
            .call_method(activity, "getPackageName", "()Ljava/lang/String;", &[])?
            .l()?;
        let own_package: String = env.get_string(&JString::from(own_package))?.into();
        let authority = env.new_string(format!("{}.fileprovider", own_package))?;

        let jpath = env.new_string(path_string)?;
        let file = env.new_object(
            "java/io/File",
            "(Ljava/lang/String;)V",
            &[JValue::Object(&jpath)],
        )?;

        let file_provider = load_app_class(env, activity, "androidx.core.content.FileProvider")?;
        let uri = env
            .call_static_method(
                &file_provider,
                "getUriForFile",
                "(Landroid/content/Context;Ljava/lang/String;Ljava/io/File;)Landroid/net/Uri;",
                &[
                    JValue::Object(activity),
                    JValue::Object(&authority),
                    JValue::Object(&file),
                ],
            )?
            .l()?;

        let action = env.new_string("android.intent.action.SEND")?;
        let intent = env.new_object(
            "android/content/Intent",
            "(Ljava/lang/String;)V",
            &[JValue::Object(&action)],
        )?;
        let mime_type = env.new_string("*/*")?;
        env.call_method(
            &intent,
            "setType",
            "(Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&mime_type)],
        )?;
        let extra_stream = env.new_string("android.intent.extra.STREAM")?;
        env.call_method(
            &intent,
            "putExtra",
            "(Ljava/lang/String;Landroid/os/Parcelable;)Landroid/content/Intent;",
            &[JValue::Object(&extra_stream), JValue::Object(&uri)],
        )?;
        env.call_method(
            &intent,
            "addFlags",
            "(I)Landroid/content/Intent;",
            &[JValue::Int(FLAG_GRANT_READ_URI_PERMISSION)],
        )?;

        // Without ClipData some receivers never get the URI grant.
        let resolver = env
            .call_method(
                activity,
                "getContentResolver",
                "()Landroid/content/ContentResolver;",
                &[],
            )?
            .l()?;
        let clip_label = env.new_string("APK")?;
        let clip = env
            .call_static_method(
                "android/content/ClipData",
                "newUri",
                "(Landroid/content/ContentResolver;Ljava/lang/CharSequence;Landroid/net/Uri;)Landroid/content/ClipData;",
                &[
                    JValue::Object(&resolver),
                    JValue::Object(&clip_label),
                    JValue::Object(&uri),
                ],
            )?
            .l()?;
        env.call_method(
            &intent,
            "setClipData",
            "(Landroid/content/ClipData;)V",
            &[JValue::Object(&clip)],
        )?;

        let title = env.new_string(chooser_title)?;
        let chooser = env
            .call_static_method(
                "android/content/Intent",
                "createChooser",
                "(Landroid/content/Intent;Ljava/lang/CharSequence;)Landroid/content/Intent;",
                &[JValue::Object(&intent), JValue::Object(&title)],
            )?
            .l()?;

        start_activity(env, activity, &chooser)
    })
    .with_context(|| format!("Failed to share {:?}", path))
}
