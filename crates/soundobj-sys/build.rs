use std::env;
use std::path::{Path, PathBuf};

/// miniaudio release the shim and bindings are written against.
const MINIAUDIO_TAG: &str = "0.11.22";

const OPUS_SOURCE: &str = "extras/decoders/libopus/miniaudio_libopus.c";
const VORBIS_SOURCE: &str = "extras/decoders/libvorbis/miniaudio_libvorbis.c";

fn main() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR").unwrap());
    let target_os = env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let target_arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();

    let with_opus = env::var_os("CARGO_FEATURE_OPUS").is_some();
    let with_vorbis = env::var_os("CARGO_FEATURE_VORBIS").is_some();

    println!("cargo:rerun-if-env-changed=MINIAUDIO_DIR");
    println!("cargo:rerun-if-env-changed=VCPKG_INSTALLED_DIR");
    println!("cargo:rerun-if-changed=wrapper.h");
    println!("cargo:rerun-if-changed=shim/soundobj.c");
    println!("cargo:rerun-if-changed=shim/soundobj.h");

    let vcpkg_dir = vcpkg_triplet(&target_os, &target_arch)
        .map(|triplet| vcpkg_installed_dir(&manifest_dir).join(triplet))
        .filter(|dir| dir.is_dir());

    let mut extras = Vec::new();
    if with_opus {
        extras.push(OPUS_SOURCE);
    }
    if with_vorbis {
        extras.push(VORBIS_SOURCE);
    }

    let miniaudio_dir = locate_miniaudio(&manifest_dir, &out_dir, vcpkg_dir.as_deref(), &extras);

    // Compile miniaudio's implementation together with the shim
    let mut build = cc::Build::new();
    build
        .file(manifest_dir.join("shim").join("soundobj.c"))
        .include(&miniaudio_dir)
        .include(manifest_dir.join("shim"))
        .warnings(false);

    if let Some(ref dir) = vcpkg_dir {
        build.include(dir.join("include"));
    }

    let mut codec_libs: Vec<&str> = Vec::new();
    let mut codec_links = Vec::new();
    if with_opus {
        build.define("SOUNDOBJ_WITH_OPUS", None);
        build.file(miniaudio_dir.join(OPUS_SOURCE));
        codec_libs.extend(["opusfile", "opus"]);
    }
    if with_vorbis {
        build.define("SOUNDOBJ_WITH_VORBIS", None);
        build.file(miniaudio_dir.join(VORBIS_SOURCE));
        codec_libs.extend(["vorbisfile", "vorbis"]);
    }
    if !codec_libs.is_empty() {
        codec_libs.push("ogg");
        codec_links = resolve_codecs(&mut build, vcpkg_dir.as_deref(), &codec_libs);
    }

    build.compile("soundobj_shim");
    for directive in codec_links {
        println!("{directive}");
    }

    // Platform libraries required by miniaudio's device backends
    match target_os.as_str() {
        "linux" | "android" | "freebsd" | "openbsd" | "netbsd" => {
            println!("cargo:rustc-link-lib=pthread");
            println!("cargo:rustc-link-lib=m");
            println!("cargo:rustc-link-lib=dl");
        }
        "macos" | "ios" => {
            println!("cargo:rustc-link-lib=framework=CoreFoundation");
            println!("cargo:rustc-link-lib=framework=CoreAudio");
            println!("cargo:rustc-link-lib=framework=AudioToolbox");
        }
        _ => {}
    }

    // Generate bindings
    let bindings = bindgen::Builder::default()
        .header(manifest_dir.join("wrapper.h").to_str().unwrap())
        .clang_arg(format!("-I{}", miniaudio_dir.display()))
        .clang_arg(format!("-I{}", manifest_dir.join("shim").display()))
        .allowlist_function("ma_engine_.*")
        .allowlist_function("ma_sound_.*")
        .allowlist_function("ma_resource_manager_.*")
        .allowlist_function("ma_result_description")
        .allowlist_function("ma_version.*")
        .allowlist_function("soundobj_.*")
        .allowlist_type("ma_.*")
        .allowlist_var("MA_.*")
        .prepend_enum_name(false)
        .derive_debug(true)
        .derive_default(true)
        .generate()
        .expect("Failed to generate bindings");

    bindings
        .write_to_file(out_dir.join("bindings.rs"))
        .expect("Failed to write bindings");
}

/// vcpkg triplet for the prebuilt codec libraries, keyed by target platform.
fn vcpkg_triplet(target_os: &str, target_arch: &str) -> Option<&'static str> {
    match (target_os, target_arch) {
        ("windows", "x86_64") => Some("x64-windows-static-md"),
        ("macos", "aarch64") => Some("arm64-osx-static"),
        ("linux", "x86_64") => Some("x64-linux-static"),
        _ => None,
    }
}

/// Root of the vcpkg manifest-mode install tree. Defaults to
/// `vcpkg_installed/` next to the workspace `vcpkg.json`.
fn vcpkg_installed_dir(manifest_dir: &Path) -> PathBuf {
    if let Some(dir) = env::var_os("VCPKG_INSTALLED_DIR") {
        return PathBuf::from(dir);
    }
    manifest_dir
        .ancestors()
        .find(|dir| dir.join("vcpkg.json").is_file())
        .unwrap_or(manifest_dir)
        .join("vcpkg_installed")
}

/// Find a directory containing `miniaudio.h` and every requested extras
/// source, laid out like the upstream repository.
fn locate_miniaudio(
    manifest_dir: &Path,
    out_dir: &Path,
    vcpkg_dir: Option<&Path>,
    extras: &[&str],
) -> PathBuf {
    let has_sources =
        |dir: &Path| dir.join("miniaudio.h").is_file() && extras.iter().all(|f| dir.join(f).is_file());

    let mut candidates = Vec::new();
    if let Some(dir) = env::var_os("MINIAUDIO_DIR") {
        candidates.push(PathBuf::from(dir));
    }
    candidates.push(manifest_dir.join("vendor").join("miniaudio"));
    if let Some(dir) = vcpkg_dir {
        candidates.push(dir.join("include"));
    }
    candidates.push(out_dir.join("miniaudio"));

    if let Some(found) = candidates.into_iter().find(|dir| has_sources(dir)) {
        return found;
    }

    let dest = out_dir.join("miniaudio");
    download_miniaudio(&dest, extras);
    dest
}

#[cfg(not(feature = "auto-install"))]
fn download_miniaudio(_dest: &Path, _extras: &[&str]) {
    panic!(
        "miniaudio {MINIAUDIO_TAG} sources not found. Set MINIAUDIO_DIR, check out \
         vendor/miniaudio, run `vcpkg install`, or enable the `auto-install` feature."
    );
}

#[cfg(feature = "auto-install")]
fn download_miniaudio(dest: &Path, extras: &[&str]) {
    let base = format!("https://raw.githubusercontent.com/mackron/miniaudio/{MINIAUDIO_TAG}");

    let mut files = vec!["miniaudio.h".to_string()];
    for source in extras {
        files.push((*source).to_string());
        files.push(source.replace(".c", ".h"));
    }

    for file in files {
        let target = dest.join(&file);
        if target.is_file() {
            continue;
        }
        let url = format!("{base}/{file}");
        println!("cargo:warning=downloading {url}");

        let data = ureq::get(&url)
            .call()
            .unwrap_or_else(|e| panic!("Failed to download {url}: {e}"))
            .into_body()
            .read_to_vec()
            .unwrap_or_else(|e| panic!("Failed to read {url}: {e}"));

        std::fs::create_dir_all(target.parent().unwrap()).expect("Failed to create miniaudio dir");
        std::fs::write(&target, data).expect("Failed to write miniaudio source");
    }
}

/// Resolve the Ogg/Opus/Vorbis libraries, preferring the vcpkg install tree
/// and falling back to pkg-config. Returns the link directives, which must be
/// emitted after the shim archive so static linking resolves in order.
fn resolve_codecs(build: &mut cc::Build, vcpkg_dir: Option<&Path>, libs: &[&str]) -> Vec<String> {
    let mut directives = Vec::new();

    if let Some(dir) = vcpkg_dir.filter(|dir| dir.join("lib").is_dir()) {
        // opusfile.h includes <opus_multistream.h> without the opus/ prefix
        build.include(dir.join("include").join("opus"));
        directives.push(format!("cargo:rustc-link-search=native={}", dir.join("lib").display()));
        for lib in libs {
            directives.push(format!("cargo:rustc-link-lib=static={lib}"));
        }
        return directives;
    }

    for lib in libs {
        let library = pkg_config::Config::new()
            .cargo_metadata(false)
            .probe(lib)
            .unwrap_or_else(|e| panic!("{lib} not found via vcpkg or pkg-config: {e}"));
        for path in library.include_paths {
            build.include(path);
        }
        for path in library.link_paths {
            directives.push(format!("cargo:rustc-link-search=native={}", path.display()));
        }
        for name in library.libs {
            directives.push(format!("cargo:rustc-link-lib={name}"));
        }
    }
    directives
}
