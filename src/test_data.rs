use ndarray::{s, Array1, Array2};

/// Small noisy plane `y = 1 + 2 x1 - x2 + 0.5 sin(3 x1)`, response in the first column.
pub fn setup_data_hardcoded() -> (Array2<f64>, Array1<f64>) {
    let dat = Array2::from_shape_vec(
        (16, 3),
        vec![
            -0.5010460612120035, -0.11963712627571743, 0.9130571656928304,
            -0.5336106884880405, -0.3596456421250971, 0.8664575743265708,
            0.09431230830767454, -0.939115448797331, -1.0193334032253079,
            -1.2785743690841942, -0.33651159622283844, 0.9110365395442042,
            5.050473265006533, 1.8529985910095914, -0.7618831532051611,
            0.7407321314956278, 0.9254403345100273, 1.9986524840326174,
            -2.5581822396683944, -1.1744726690881686, 1.0103627958204724,
            4.974414200806838, 1.4876269296562836, -1.406514390361063,
            -0.579272962256115, -1.1495557168882762, -0.35235819282528347,
            1.4980683651859334, -0.3337173621093825, -1.5032659254873755,
            1.8281012795734075, 0.9740143459727126, 1.051244685861985,
            -0.7366511670572549, -1.1954097054754875, -0.29277251915979674,
            0.393535896836665, -0.7341834435555836, -1.1437717108415777,
            -1.3624239897510821, -1.8380518034127689, -1.099121249857009,
            -3.937437304840218, -1.922316760687366, 1.461649365987732,
            2.9390027869456397, 1.8413840404203077, 1.2175254137860825,
        ],
    )
    .unwrap();
    let y = dat.slice(s![.., 0]).to_owned();
    let x = dat.slice(s![.., 1..]).to_owned();
    (x, y)
}
