// PackageManager queries over JNI.

// reference
// https://developer.android.com/reference/android/content/pm/PackageManager
// queryIntentActivities
// getLaunchIntentForPackage
// getApplicationInfo

use crate::models::LaunchableComponent;
use anyhow::{Context, Result};
use jni::objects::{GlobalRef, JByteArray, JObject, JString, JValue};
use jni::JNIEnv;

/// Edge length of the bitmap icons are rendered into before PNG encoding.
const ICON_SIZE_PX: i32 = 96;

/// Attaches to the JVM and runs `f` with the current activity. A pending Java
/// exception is logged and cleared before returning.
pub(crate) fn with_android_env<R>(
    f: impl FnOnce(&mut JNIEnv, &JObject) -> jni::errors::Result<R>,
) -> Result<R> {
    let ctx = ndk_context::android_context();
    let vm = unsafe { jni::JavaVM::from_raw(ctx.vm() as _) }
        .context("Expected to find JVM via ndk_context crate")?;
    let activity = unsafe { JObject::from_raw(ctx.context() as _) };
    let mut env = vm
        .attach_current_thread()
        .context("Failed to attach current thread")?;

    let result = f(&mut *env, &activity);

    if env.exception_check().unwrap_or(false) {
        let _ = env.exception_describe();
        let _ = env.exception_clear();
    }
    Ok(result?)
}

fn get_package_manager<'local>(
    env: &mut JNIEnv<'local>,
    activity: &JObject,
) -> jni::errors::Result<JObject<'local>> {
    env.call_method(
        activity,
        "getPackageManager",
        "()Landroid/content/pm/PackageManager;",
        &[],
    )?
    .l()
}

fn java_string(env: &mut JNIEnv, obj: JObject) -> jni::errors::Result<String> {
    if obj.is_null() {
        return Ok(String::new());
    }
    let jstring = JString::from(obj);
    let value: String = env.get_string(&jstring)?.into();
    env.delete_local_ref(jstring)?;
    Ok(value)
}

/// Renders a Drawable into an ARGB bitmap and returns it PNG-encoded.
fn drawable_to_png(env: &mut JNIEnv, drawable: &JObject) -> jni::errors::Result<Vec<u8>> {
    let config = env
        .get_static_field(
            "android/graphics/Bitmap$Config",
            "ARGB_8888",
            "Landroid/graphics/Bitmap$Config;",
        )?
        .l()?;
    let bitmap = env
        .call_static_method(
            "android/graphics/Bitmap",
            "createBitmap",
            "(IILandroid/graphics/Bitmap$Config;)Landroid/graphics/Bitmap;",
            &[
                JValue::Int(ICON_SIZE_PX),
                JValue::Int(ICON_SIZE_PX),
                JValue::Object(&config),
            ],
        )?
        .l()?;
    let canvas = env.new_object(
        "android/graphics/Canvas",
        "(Landroid/graphics/Bitmap;)V",
        &[JValue::Object(&bitmap)],
    )?;

    env.call_method(
        drawable,
        "setBounds",
        "(IIII)V",
        &[
            JValue::Int(0),
            JValue::Int(0),
            JValue::Int(ICON_SIZE_PX),
            JValue::Int(ICON_SIZE_PX),
        ],
    )?;
    env.call_method(
        drawable,
        "draw",
        "(Landroid/graphics/Canvas;)V",
        &[JValue::Object(&canvas)],
    )?;

    let format = env
        .get_static_field(
            "android/graphics/Bitmap$CompressFormat",
            "PNG",
            "Landroid/graphics/Bitmap$CompressFormat;",
        )?
        .l()?;
    let stream = env.new_object("java/io/ByteArrayOutputStream", "()V", &[])?;
    env.call_method(
        &bitmap,
        "compress",
        "(Landroid/graphics/Bitmap$CompressFormat;ILjava/io/OutputStream;)Z",
        &[
            JValue::Object(&format),
            JValue::Int(100),
            JValue::Object(&stream),
        ],
    )?;
    let bytes = env.call_method(&stream, "toByteArray", "()[B", &[])?.l()?;
    env.convert_byte_array(&JByteArray::from(bytes))
}

fn read_component(
    env: &mut JNIEnv,
    package_manager: &JObject,
    resolve_info: &JObject,
) -> jni::errors::Result<LaunchableComponent> {
    let activity_info = env
        .get_field(
            resolve_info,
            "activityInfo",
            "Landroid/content/pm/ActivityInfo;",
        )?
        .l()?;
    let package_name = env
        .get_field(&activity_info, "packageName", "Ljava/lang/String;")?
        .l()?;
    let package_id = java_string(env, package_name)?;
    let activity_name = env
        .get_field(&activity_info, "name", "Ljava/lang/String;")?
        .l()?;
    let activity_name = java_string(env, activity_name)?;

    let label = env
        .call_method(
            resolve_info,
            "loadLabel",
            "(Landroid/content/pm/PackageManager;)Ljava/lang/CharSequence;",
            &[JValue::Object(package_manager)],
        )?
        .l()?;
    let label = env
        .call_method(&label, "toString", "()Ljava/lang/String;", &[])?
        .l()?;
    let label = java_string(env, label)?;

    let icon = env
        .call_method(
            resolve_info,
            "loadIcon",
            "(Landroid/content/pm/PackageManager;)Landroid/graphics/drawable/Drawable;",
            &[JValue::Object(package_manager)],
        )?
        .l()?;
    let icon_png = if icon.is_null() {
        Vec::new()
    } else {
        match drawable_to_png(env, &icon) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::debug!("Failed to render icon for {}: {}", package_id, e);
                let _ = env.exception_clear();
                Vec::new()
            }
        }
    };

    Ok(LaunchableComponent {
        package_id,
        activity_name,
        label,
        icon_png,
    })
}

/// `queryIntentActivities(ACTION_MAIN + CATEGORY_LAUNCHER, 0)`
pub fn query_launchable_components() -> Result<Vec<LaunchableComponent>> {
    with_android_env(|env, activity| {
        let package_manager = get_package_manager(env, activity)?;

        let action = env.new_string("android.intent.action.MAIN")?;
        let intent = env.new_object(
            "android/content/Intent",
            "(Ljava/lang/String;)V",
            &[JValue::Object(&action)],
        )?;
        let category = env.new_string("android.intent.category.LAUNCHER")?;
        env.call_method(
            &intent,
            "addCategory",
            "(Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&category)],
        )?;

        let resolve_infos = env
            .call_method(
                &package_manager,
                "queryIntentActivities",
                "(Landroid/content/Intent;I)Ljava/util/List;",
                &[JValue::Object(&intent), JValue::Int(0)],
            )?
            .l()?;
        let size = env.call_method(&resolve_infos, "size", "()I", &[])?.i()?;

        let mut components = Vec::with_capacity(size.max(0) as usize);
        for i in 0..size {
            // Each entry creates a dozen local refs; free them per iteration.
            let component = env.with_local_frame(32, |env| {
                let resolve_info = env
                    .call_method(
                        &resolve_infos,
                        "get",
                        "(I)Ljava/lang/Object;",
                        &[JValue::Int(i)],
                    )?
                    .l()?;
                read_component(env, &package_manager, &resolve_info)
            })?;
            components.push(component);
        }
        Ok(components)
    })
    .context("Failed to query launcher activities")
}

/// `getLaunchIntentForPackage`, `None` when the package has no launcher entry.
pub fn get_launch_intent(package_id: &str) -> Result<Option<(GlobalRef, Option<String>)>> {
    with_android_env(|env, activity| {
        let package_manager = get_package_manager(env, activity)?;
        let package_name = env.new_string(package_id)?;
        let intent = env
            .call_method(
                &package_manager,
                "getLaunchIntentForPackage",
                "(Ljava/lang/String;)Landroid/content/Intent;",
                &[JValue::Object(&package_name)],
            )?
            .l()?;
        if intent.is_null() {
            return Ok(None);
        }

        let component = env
            .call_method(&intent, "getComponent", "()Landroid/content/ComponentName;", &[])?
            .l()?;
        let component = if component.is_null() {
            None
        } else {
            let flat = env
                .call_method(&component, "flattenToString", "()Ljava/lang/String;", &[])?
                .l()?;
            Some(java_string(env, flat)?)
        };

        Ok(Some((env.new_global_ref(&intent)?, component)))
    })
    .with_context(|| format!("Failed to resolve launch intent for {}", package_id))
}

/// `getApplicationInfo(package, 0).sourceDir`
pub fn get_application_source_dir(package_id: &str) -> Result<String> {
    let source_dir = with_android_env(|env, activity| {
        let package_manager = get_package_manager(env, activity)?;
        let package_name = env.new_string(package_id)?;
        let app_info = env
            .call_method(
                &package_manager,
                "getApplicationInfo",
                "(Ljava/lang/String;I)Landroid/content/pm/ApplicationInfo;",
                &[JValue::Object(&package_name), JValue::Int(0)],
            )?
            .l()?;
        let source_dir = env
            .get_field(&app_info, "sourceDir", "Ljava/lang/String;")?
            .l()?;
        java_string(env, source_dir)
    })
    .with_context(|| format!("Failed to get application info for {}", package_id))?;

    if source_dir.is_empty() {
        anyhow::bail!("{} has no sourceDir", package_id);
    }
    Ok(source_dir)
}
