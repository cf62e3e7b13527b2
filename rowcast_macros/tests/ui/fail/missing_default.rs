use rowcast_macros::Mappable;

// No Default derive: the generated Mappable impl must fail its bound.
#[derive(Mappable)]
struct NoDefault {
    #[db]
    id: i64,
}

fn main() {}
