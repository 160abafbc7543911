mod value_model_test;
