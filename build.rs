// Build script for summa-client
// Generates Rust code from proto/*.proto (messages, client and server stubs)

const PROTOS: &[&str] = &[
    "proto/consumer_service.proto",
    "proto/index_service.proto",
    "proto/reflection_service.proto",
    "proto/search_service.proto",
];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if std::env::var_os("PROTOC").is_none() {
        let protoc = protoc_bin_vendored::protoc_bin_path().map_err(|e| e.to_string())?;
        std::env::set_var("PROTOC", protoc);
    }

    for proto in PROTOS {
        println!("cargo:rerun-if-changed={proto}");
    }

    tonic_build::configure()
        .build_client(true)
        .build_server(true)
        .compile_protos(PROTOS, &["proto"])?;
    Ok(())
}
