use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_root = PathBuf::from("../proto");

    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    // Tell cargo to recompile if any proto files change
    println!("cargo:rerun-if-changed=../proto/project/user/v1/");

    // Compile login service protos
    tonic_build::configure()
        .build_server(true)
        .build_client(true)
        .file_descriptor_set_path(
            PathBuf::from(std::env::var("OUT_DIR")?).join("user_service_descriptor.bin"),
        )
        .compile_protos(&["../proto/project/user/v1/login.proto"], &[proto_root])?;

    Ok(())
}
