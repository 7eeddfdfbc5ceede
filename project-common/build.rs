use std::path::PathBuf;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let proto_root = PathBuf::from("../proto");

    if std::env::var_os("PROTOC").is_none() {
        std::env::set_var("PROTOC", protoc_bin_vendored::protoc_bin_path()?);
    }

    println!("cargo:rerun-if-changed=../proto/project/user/v1/");
    println!("cargo:rerun-if-changed=../proto/project/project/v1/");

    // User service protos (client-side, used by the gateway)
    tonic_build::configure()
        .build_server(false)
        .build_client(true)
        .compile_protos(&["../proto/project/user/v1/login.proto"], &[&proto_root])?;

    // Project service protos (client-side, used by the gateway)
    tonic_build::configure()
        .build_server(false)
        .build_client(true)
        .compile_protos(
            &["../proto/project/project/v1/project.proto"],
            &[&proto_root],
        )?;

    Ok(())
}
