fn main() {
    cynic_codegen::register_schema("assignments")
        .from_sdl_file("schemas/assignments.graphql")
        .unwrap()
        .as_default()
        .unwrap();
}
