use csv::ReaderBuilder;
use ndarray::{Array1, Array2};

#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn setup_data_csv() -> (Array2<f64>, Array1<f64>) {
    // Reads data from file "data/dat.csv", response in the first column
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .from_path("./data/dat.csv")
        .expect("Failed to open file");

    let mut x_data = Vec::new();
    let mut y_data = Vec::new();
    for result in rdr.records() {
        let record = result.expect("Failed to read record");
        let y: f64 = record[0].parse().expect("Failed to parse y");
        let x1: f64 = record[1].parse().expect("Failed to parse x1");
        let x2: f64 = record[2].parse().expect("Failed to parse x2");
        y_data.push(y);
        x_data.push(vec![x1, x2]);
    }
    let x = Array2::from_shape_vec((x_data.len(), 2), x_data.into_iter().flatten().collect())
        .expect("Failed to create Array2");
    let y = Array1::from(y_data);
    (x, y)
}
